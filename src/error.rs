use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("{_0}")]
    Usage(#[error(not(source))] String),
    #[display("could not load {}", _0.display())]
    Input(#[error(not(source))] PathBuf),
    #[display("built-in catalog is unusable: {_0}")]
    Catalog(#[error(not(source))] String),
    #[display("package could not be built")]
    Build,
    #[display("could not write {}", _0.display())]
    Output(#[error(not(source))] PathBuf),
}
