pub mod photo;
pub mod resume;

pub use photo::{Photo, PhotoBlob};
pub use resume::{BorderStyle, Education, ResumeData, TemplateId, WorkExperience};
