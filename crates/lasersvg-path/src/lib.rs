//! # LaserSVG Path
//!
//! The parametric path templating engine. It turns SVG path data drawn for
//! one material thickness into a template whose thickness-sized features are
//! written as expressions of `thickness`, and turns such a template back
//! into literal path data for any other thickness.
//!
//! ## Components
//!
//! - **Command model**: [`PathCommand`], [`Contour`] and [`Template`]
//! - **Parsing**: path data and template text, absolute input converted to
//!   relative form
//! - **Expressions**: [`Expression`], the canonical `offset + factor * thickness`
//! - **Classifier**: [`SegmentClassifier`] tags thickness-matching segments
//! - **Slit corrector**: [`SlitCorrector`] keeps slits centred and their walls
//!   attached as the thickness changes
//! - **Evaluator**: [`materialize`] substitutes a concrete thickness
//! - **Utilities**: cleanup of short segments, reversal, candidate discovery
//!
//! ## Usage
//!
//! ```rust
//! use lasersvg_path::{materialize, tag_all, Contour};
//!
//! let contour: Contour = "m 0,0 l 10,0 l 0,5 l 3,0 l 0,-5 l 10,0".parse().unwrap();
//! let template = tag_all(&contour, 5.0, 0.1).unwrap();
//! assert_eq!(
//!     template.to_string(),
//!     "m 0,0 l 10,0 l 0,{thickness} l 3,0 l 0,{-thickness} l 10,0"
//! );
//!
//! let thicker = materialize(&template, 6.0).unwrap();
//! assert_eq!(thicker.to_string(), "m 0,0 l 10,0 l 0,6 l 3,0 l 0,-6 l 10,0");
//! ```

pub mod classifier;
pub mod cleanup;
pub mod command;
pub mod evaluator;
pub mod expression;
pub mod geometry;
pub mod parser;
pub mod resolve;
pub mod reverse;
pub mod slit;

pub use classifier::{candidates, tag_all, tag_selected, Candidate, SegmentClassifier, TagOptions};
pub use cleanup::{remove_short_segments, CleanupReport};
pub use command::{CommandKind, Contour, PathArg, PathCommand, Template};
pub use evaluator::{materialize, materialize_str};
pub use expression::{Argument, Expression, ExpressionError, Sign};
pub use geometry::DirectedSegment;
pub use parser::{parse_contour, parse_template};
pub use resolve::{resolve, ResolvedSegment, SegmentShape};
pub use reverse::reverse;
pub use slit::{tag_slits, SlitContext, SlitCorrector, SlitOptions, SlitOutcome, SlitReport};
