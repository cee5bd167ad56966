//! Off-thread LOD generation.
//!
//! ```text
//! ┌──────────────┐   start()    ┌────────────────────┐
//! │ caller thread├─────────────►│ rayon worker       │
//! │ (render/UI)  │              │ generate_lods(...) │
//! │              │◄─────────────┤                    │
//! └──────────────┘ poll_results └────────────────────┘
//!        │          (bounded(1))
//!        ▼
//!  publish the whole LOD array at once
//! ```
//!
//! Generation itself never suspends or reports partial progress. The caller
//! receives either nothing or the complete array, so shared asset state is
//! swapped in one step.
//!
//! For many meshes at once, see [`LodStage`](crate::task_queue::LodStage).

pub mod async_lod;

pub use async_lod::{AsyncLodPipeline, LodJob, LodJobResult};
