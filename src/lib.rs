// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Live delivery of a GPU-rendered molecular viewer.
//!
//! viso-live loads one PDB or mmCIF structure, draws its atoms as
//! ray-cast sphere impostors around an orbiting camera, and delivers the
//! frames to three kinds of consumer:
//!
//! - [`server::StreamingServer`] - a browser-reachable HTTP endpoint
//!   serving a bootstrap page at `/` and a `multipart/x-mixed-replace`
//!   PNG stream at any other path
//! - [`window::WindowHost`] - a view bound to a window owned by a foreign
//!   event loop, redrawn only when that loop asks
//! - `Context::run_blocking_loop` - a standalone native window with its
//!   own continuously redrawing event loop (`viewer` feature)
//!
//! # Ownership
//!
//! A [`gpu::context::Context`] is created first and outlives every
//! [`structure::StructureModel`] and [`view::FrameView`] built from it.
//! Models and views borrow the context at construction; containers that
//! own all three ([`server::OffscreenScene`]) declare them so they drop
//! view first, context last.
//!
//! # Frame sources
//!
//! The server only sees the [`server::FrameSource`] trait, so any
//! producer of RGBA [`frame::Frame`]s can be streamed.

pub mod camera;
pub mod error;
pub mod frame;
pub mod gpu;
pub mod options;
pub mod renderer;
pub mod server;
pub mod structure;
pub mod util;
pub mod view;
pub mod window;

pub use error::LiveError;
pub use frame::{Frame, PngCompression};
pub use gpu::context::Context;
pub use options::Options;
pub use server::{FrameSource, OffscreenScene, StreamingServer};
pub use structure::StructureModel;
pub use view::{FrameView, RenderError, Rendered};
pub use window::WindowHost;
