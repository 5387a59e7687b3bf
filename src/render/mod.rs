pub mod compositor;
pub mod shadow;
