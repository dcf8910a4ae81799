pub(crate) mod lenient;
pub(crate) mod redact;
pub(crate) mod url;
