// Widget renderers, one file per section of the screen.

pub mod boards;
pub mod login;
pub mod nav;
pub mod table;
pub mod tiles;
