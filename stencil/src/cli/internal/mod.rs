//! Internal utilities shared by the form commands.
//!
//! [`FormArgs`] identifies the template being authored and carries the
//! edits given on the command line.

mod form_args;

pub use self::form_args::FormArgs;
