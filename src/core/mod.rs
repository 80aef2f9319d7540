pub mod chunk;
pub mod error;
pub mod font;
pub mod genesis;
pub mod grid;
pub mod hash;
pub mod layout;
pub mod render;
