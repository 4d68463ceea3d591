/*
 * Dead Globals
 *
 * Removes global variables no live code reads, so a reduced shader does
 * not carry declarations its rewrites left behind.
 *
 * Architecture:
 * - Domain: StripReport
 * - Application: DeadGlobalEliminator (GlobalUsage listener + sweep)
 *
 * One walk, one sweep, no randomness. Running it again right away removes
 * nothing.
 */

pub mod application;
pub mod domain;

pub use application::{strip_unused_globals, DeadGlobalEliminator};
pub use domain::StripReport;
