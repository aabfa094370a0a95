pub mod contour;
pub mod export;
pub mod wall_angles;
