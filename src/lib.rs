mod cast;
mod convert;
mod error;
mod explain;
mod fields;
mod float;
mod string;
mod utils;

#[cfg(feature = "python")]
mod py;

pub use self::cast::encode;
pub use self::convert::{convert, Conversion};
pub use self::error::Error;
pub use self::explain::{explain, Step};
pub use self::fields::{decompose, FieldDecomposition};
pub use self::float::{BitLayout, Classification, Precision};
pub use self::string::{parse_decimal, render_binary_grouped, render_hex};

pub type Result<T> = core::result::Result<T, Error>;
