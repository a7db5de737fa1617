mod email;

pub use email::{Email, IEmailService, InMemoryEmailService, SmtpEmailService};
