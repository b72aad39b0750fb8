//! Extraction engine.
//!
//! This module is the *public entry point* for the phrase finder's runtime. The
//! grammar itself (states and transition functions) lives in `crate::grammar`;
//! the engine owns everything the transitions read and write, and the loop that
//! feeds them.
//!
//! ## How the parts work together
//!
//! Extracting phrases from a text is a streaming pipeline:
//!
//! ```text
//! text ── Scanner (scanner.rs) ── ScanItem ──┐
//!                                            │
//!            punctuation / spacing ──────────┼──> LexicalContext   (context.rs)
//!                                            │      - marks since the last word
//!            words ──> CompoundResolver ─────┤      - sentence breaks, case profile
//!                      (compound.rs)         │
//!                      - hold "new" until "york" decides
//!                      - replay failed queues word by word
//!                                            │
//!                                            v
//!                          Extractor::dispatch (extractor.rs)
//!                            - primary hypothesis: grammar::step
//!                            - parallel general reading (parallel.rs)
//!                            - prepositional objects (stack.rs)
//!                                            │
//!                                            v
//!                          Emitter (emit.rs): threshold gate
//!                                            │
//!                                            v
//!                                  PhraseSink::receive_phrase
//! ```
//!
//! Exactly one primary hypothesis is open at a time. A word that could begin a
//! date, name or place and is also an ordinary word ("March", "Jack") opens a
//! second, suppressed reading in the general family; whichever reading is left
//! when the primary dies without output takes over.
//!
//! ## Responsibilities by module
//!
//! - `context.rs`: buffers punctuation between words and answers the grammar's
//!   punctuation queries; tracks whether the text shouts or is headline case.
//! - `compound.rs`: recognizes multi-word lexicon entries before dispatch.
//! - `registers.rs`: per-family working fields and the offsets shared with the
//!   emitter.
//! - `confidence.rs`: penalty weights and the arithmetic on the running score.
//! - `stack.rs`: saves the enclosing noun phrase while a prepositional object is
//!   read, and folds the object back in.
//! - `parallel.rs`: runs the secondary reading with its own score and start.
//! - `machine.rs`: the bundle of state every transition function receives.
//! - `emit.rs`: span computation, the threshold gate and the sink trait.
//! - `extractor.rs`: the dispatch loop.
//! - `metrics.rs`: per-run counters and timing.
//!
//! ## Public surface
//!
//! Most code interacts with the engine via:
//!
//! - [`Extractor`] (streaming; bring your own [`PhraseSink`])
//! - [`FoundPhrase`] and [`RunMetrics`]
//! - [`Penalties`] and [`YearBias`] (tuning, through `Options`)
//!
//! ## Debugging
//!
//! Set `PHRASEFINDER_LOG=phrasefinder=debug` (or `trace`) for emission and
//! hypothesis logs from the CLI; `Options::trace` adds one line per transition.

#[path = "engine/compound.rs"]
mod compound;
#[path = "engine/confidence.rs"]
pub(crate) mod confidence;
#[path = "engine/context.rs"]
mod context;
#[path = "engine/emit.rs"]
mod emit;
#[path = "engine/extractor.rs"]
mod extractor;
#[path = "engine/machine.rs"]
mod machine;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parallel.rs"]
mod parallel;
#[path = "engine/registers.rs"]
pub(crate) mod registers;
#[path = "engine/stack.rs"]
mod stack;

pub use confidence::Penalties;
pub use emit::{FoundPhrase, PhraseSink};
pub use extractor::Extractor;
pub use machine::YearBias;
pub use metrics::{CompoundMetrics, ParallelMetrics, RunMetrics, StackMetrics};

pub(crate) use machine::Machine;
pub(crate) use registers::Family;
