//! Script host for JTL pages.
//!
//! Uses [Boa](https://boajs.dev/) as the JavaScript engine, behind the
//! [`ScriptHost`] trait. Values cross the boundary as [`ScriptValue`]s, and
//! element records convert to and from them losslessly.
//!
//! # Example
//!
//! ```ignore
//! use jtl_js::{BoaHost, ScriptHost, ScriptValue};
//!
//! let mut host = BoaHost::new()?;
//! let value = host.run("1 + 2")?;
//! assert_eq!(value, ScriptValue::Number(3.0));
//! ```
//!
//! # Implemented
//!
//! - Script execution via [`ScriptHost::run`]
//! - Native functions at dotted global paths
//! - `console.log()`, `console.info()`, `console.warn()`, `console.error()`,
//!   `console.debug()` routed to `tracing`

mod boa_host;
mod globals;

/// Record <-> script value conversion.
pub mod convert;
/// Script errors.
pub mod error;
/// The host trait.
pub mod host;
/// Engine-neutral values.
pub mod value;

pub use boa_host::BoaHost;
pub use convert::{record_to_value, value_to_record, value_to_records};
pub use error::ScriptError;
pub use host::ScriptHost;
pub use value::{NativeFn, ScriptFunction, ScriptValue};
