use bytes::Bytes;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// An uploaded image held in memory. Cheap to clone: the bytes are shared.
///
/// Equality is by `id`: two blobs are the same photo iff they came from the same upload.
#[derive(Debug, Clone)]
pub struct PhotoBlob {
    pub id: Uuid,
    pub content_type: String,
    pub bytes: Bytes,
}

impl PhotoBlob {
    pub fn new(content_type: impl Into<String>, bytes: Bytes) -> Self {
        PhotoBlob {
            id: Uuid::new_v4(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl PartialEq for PhotoBlob {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// The résumé photo.
///
/// Wire shape: `null`, a URL string, or `{"id","contentType","size"}` for a blob.
/// Blobs are write-only over JSON; they only enter through an upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Photo {
    #[default]
    None,
    /// An already-resolved reference (e.g. a blob-storage URL), used as-is.
    Url(String),
    /// An in-memory upload. Displaying it requires a display handle.
    Blob(PhotoBlob),
}

impl Photo {
    pub fn is_none(&self) -> bool {
        matches!(self, Photo::None)
    }
}

impl Serialize for Photo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Photo::None => serializer.serialize_none(),
            Photo::Url(url) => serializer.serialize_str(url),
            Photo::Blob(blob) => {
                let mut s = serializer.serialize_struct("PhotoBlob", 3)?;
                s.serialize_field("id", &blob.id)?;
                s.serialize_field("contentType", &blob.content_type)?;
                s.serialize_field("size", &blob.size())?;
                s.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Photo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A serialized blob carries no bytes, so it cannot be restored; treat it as absent.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Url(String),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Option::<Wire>::deserialize(deserializer)? {
            Some(Wire::Url(url)) if !url.is_empty() => Photo::Url(url),
            _ => Photo::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_wire_shapes() {
        assert_eq!(serde_json::to_value(Photo::None).unwrap(), serde_json::Value::Null);
        assert_eq!(
            serde_json::to_value(Photo::Url("https://cdn.example.com/me.png".into())).unwrap(),
            serde_json::json!("https://cdn.example.com/me.png")
        );

        let blob = PhotoBlob::new("image/png", Bytes::from_static(b"\x89PNG"));
        let value = serde_json::to_value(Photo::Blob(blob.clone())).unwrap();
        assert_eq!(value["contentType"], "image/png");
        assert_eq!(value["size"], 4);
        assert_eq!(value["id"], blob.id.to_string());
    }

    #[test]
    fn test_photo_deserialize() {
        let photo: Photo = serde_json::from_str("null").unwrap();
        assert!(photo.is_none());
        let photo: Photo = serde_json::from_str("\"https://x/y.png\"").unwrap();
        assert_eq!(photo, Photo::Url("https://x/y.png".into()));
        let photo: Photo =
            serde_json::from_str(r#"{"id":"00000000-0000-0000-0000-000000000000","size":3}"#)
                .unwrap();
        assert!(photo.is_none());
    }

    #[test]
    fn test_blob_equality_is_by_upload() {
        let a = PhotoBlob::new("image/png", Bytes::from_static(b"same"));
        let b = PhotoBlob::new("image/png", Bytes::from_static(b"same"));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
