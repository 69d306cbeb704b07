/// Minimum number of sections a line keeps once it has been created
pub const MIN_SECTIONS: usize = 1;

/// Version header written in front of serialized lines
pub const CURRENT_LINE_FORMAT_VERSION: u32 = 1;

/// Color assigned to lines persisted without one
pub const DEFAULT_LINE_COLOR: &str = "#808080";
