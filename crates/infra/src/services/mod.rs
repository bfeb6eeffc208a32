mod email;

pub use email::{EmailMessage, IEmailProvider, InMemoryEmailProvider, ResendEmailProvider};
