/// Label table construction and resolution.
pub mod labels;


/// Property tests over generated programs.
pub mod properties;
