// Contact form boundary: input state, validation, the submission lifecycle,
// and the transport collaborator that actually delivers messages.

pub mod form;
pub mod handlers;
pub mod registry;
pub mod transport;
