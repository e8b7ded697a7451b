pub mod stage0_load;
pub mod stage1_reconstruct;
pub mod stage2_merge;
pub mod stage3_render;

pub use stage0_load::*;
pub use stage1_reconstruct::*;
pub use stage2_merge::*;
pub use stage3_render::*;
