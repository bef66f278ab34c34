// Page content: loading the CV dataset, grouping skills, and laying out sections.
// Everything here is read-only over `CvData`; nothing mutates it after startup.

pub mod handlers;
pub mod loader;
pub mod partition;
pub mod sections;
