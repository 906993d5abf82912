use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    response::{Html, IntoResponse, Response},
    Json,
};
use futures::{Sink, SinkExt, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::editor::handlers::find_session;
use crate::errors::AppError;
use crate::models::TemplateId;
use crate::render::sections::AvailableWidth;
use crate::render::PreviewMount;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreviewFormat {
    #[default]
    Html,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Container width; omitted means not measured yet.
    pub width: Option<f64>,
    #[serde(default)]
    pub format: PreviewFormat,
}

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub width: Option<f64>,
}

/// Frames sent to a preview socket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StreamFrame {
    Preview { scale: Option<f64>, html: String },
}

/// A client report of its container width.
#[derive(Debug, Deserialize)]
struct WidthReport {
    width: Option<f64>,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(
        TemplateId::ALL
            .iter()
            .map(|id| TemplateSummary {
                id: *id,
                name: id.display_name(),
            })
            .collect(),
    )
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_get_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(q): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let session = find_session(&state, id)?;
    let doc = session.preview(AvailableWidth::from_query(q.width));
    Ok(match q.format {
        PreviewFormat::Html => Html(doc.to_html()).into_response(),
        PreviewFormat::Json => Json(doc).into_response(),
    })
}

/// GET /api/v1/resumes/:id/preview/ws
///
/// Live preview. A frame goes out on mount and after every state change; the
/// client may send `{"width": W}` whenever its container is re-measured.
pub async fn handle_preview_ws(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(q): Query<StreamQuery>,
) -> Result<impl IntoResponse, AppError> {
    // The socket only holds the mount, so closing the session ends the stream.
    let mount = find_session(&state, id)?.mount_preview(AvailableWidth::from_query(q.width));
    Ok(ws.on_upgrade(move |socket| preview_connection(id, mount, socket)))
}

async fn preview_connection(id: Uuid, mount: PreviewMount, socket: WebSocket) {
    let (sender, receiver) = socket.split();
    info!(session = %id, "preview stream mounted");
    stream_preview(id, mount, sender, receiver).await;
    info!(session = %id, "preview stream unmounted");
}

/// Drives one preview socket until either side goes away.
///
/// A frame is sent on entry, after every state change and after every width
/// report. Anything else from the client is ignored without re-rendering.
async fn stream_preview<S, R, E>(id: Uuid, mut mount: PreviewMount, mut sender: S, mut receiver: R)
where
    S: Sink<Message> + Unpin,
    R: Stream<Item = Result<Message, E>> + Unpin,
{
    let mut needs_frame = true;
    loop {
        if needs_frame {
            let frame = match preview_frame(&mut mount) {
                Ok(text) => text,
                Err(e) => {
                    warn!(session = %id, "preview frame not serialised: {e}");
                    break;
                }
            };
            if sender.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }

        needs_frame = tokio::select! {
            alive = mount.changed() => {
                if !alive {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
                true
            }
            msg = receiver.next() => match msg {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<WidthReport>(&text) {
                    Ok(report) => {
                        mount.set_width(AvailableWidth::from_query(report.width));
                        true
                    }
                    Err(e) => {
                        warn!(session = %id, "ignoring preview message: {e}");
                        false
                    }
                },
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => false,
            },
        };
    }
}

fn preview_frame(mount: &mut PreviewMount) -> Result<String, serde_json::Error> {
    let doc = mount.render();
    serde_json::to_string(&StreamFrame::Preview {
        scale: doc.scale,
        html: doc.to_html(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ResumeStore;
    use crate::models::ResumeData;
    use crate::photo::DisplayHandleRegistry;
    use crate::render::sections::REFERENCE_WIDTH;
    use futures::channel::mpsc;
    use serde_json::Value;

    async fn next_preview(out: &mut mpsc::UnboundedReceiver<Message>) -> Value {
        match out.next().await {
            Some(Message::Text(text)) => serde_json::from_str(&text).unwrap(),
            other => panic!("expected a preview frame, got {other:?}"),
        }
    }

    #[test]
    fn test_preview_frame_shape() {
        let store = ResumeStore::new(ResumeData {
            summary: "Hello".to_string(),
            ..Default::default()
        });
        let mut mount = PreviewMount::mount(
            &store,
            DisplayHandleRegistry::new(1),
            AvailableWidth::Measured(397.0),
            REFERENCE_WIDTH,
        );
        let frame: serde_json::Value = serde_json::from_str(&preview_frame(&mut mount).unwrap()).unwrap();
        assert_eq!(frame["type"], "preview");
        assert_eq!(frame["scale"], 0.5);
        assert!(frame["html"].as_str().unwrap().contains("Hello"));
    }

    #[test]
    fn test_width_report_accepts_missing_width() {
        let report: WidthReport = serde_json::from_str("{}").unwrap();
        assert_eq!(AvailableWidth::from_query(report.width), AvailableWidth::Unmeasured);
    }

    #[tokio::test]
    async fn test_stream_follows_changes_and_width_reports() {
        let store = ResumeStore::new(ResumeData::default());
        let registry = DisplayHandleRegistry::new(1);
        let mount = PreviewMount::mount(&store, registry, AvailableWidth::Measured(794.0), REFERENCE_WIDTH);
        let (out_tx, mut out_rx) = mpsc::unbounded::<Message>();
        let (in_tx, in_rx) = mpsc::unbounded::<Result<Message, axum::Error>>();
        let task = tokio::spawn(stream_preview(Uuid::nil(), mount, out_tx, in_rx));

        let first = next_preview(&mut out_rx).await;
        assert_eq!(first["type"], "preview");
        assert_eq!(first["scale"], 1.0);

        store.update(|current| ResumeData {
            summary: "Streams previews".to_string(),
            ..current.clone()
        });
        let second = next_preview(&mut out_rx).await;
        assert!(second["html"].as_str().unwrap().contains("Streams previews"));

        in_tx.unbounded_send(Ok(Message::Text(r#"{"width":397}"#.to_string()))).unwrap();
        assert_eq!(next_preview(&mut out_rx).await["scale"], 0.5);

        // Neither produces a frame; the next message is the close.
        in_tx.unbounded_send(Ok(Message::Text("not json".to_string()))).unwrap();
        in_tx.unbounded_send(Ok(Message::Ping(vec![1]))).unwrap();
        drop(store);

        assert!(matches!(out_rx.next().await, Some(Message::Close(None))));
        task.await.unwrap();
        assert!(out_rx.next().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_ends_when_client_disconnects() {
        let store = ResumeStore::new(ResumeData::default());
        let registry = DisplayHandleRegistry::new(1);
        let mount = PreviewMount::mount(&store, registry, AvailableWidth::Unmeasured, REFERENCE_WIDTH);
        let (out_tx, mut out_rx) = mpsc::unbounded::<Message>();
        let (in_tx, in_rx) = mpsc::unbounded::<Result<Message, axum::Error>>();
        let task = tokio::spawn(stream_preview(Uuid::nil(), mount, out_tx, in_rx));

        assert_eq!(next_preview(&mut out_rx).await["scale"], Value::Null);
        drop(in_tx);
        task.await.unwrap();
        assert!(out_rx.next().await.is_none());
    }
}
