pub(crate) mod position;
pub(crate) mod record;
