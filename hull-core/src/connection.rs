use crate::{Executor, Result};

pub trait Connection: Executor + Sized {
    /// Open a connection to the given URL.
    fn connect(url: &str) -> Result<Self>;
}
