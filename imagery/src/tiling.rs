//! Geographic (EPSG:4326) tiling scheme.

/// A geographic rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Rectangle {
    /// Format as a WMS 1.1.1 `bbox` value: `minx,miny,maxx,maxy`.
    pub fn to_bbox(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

/// Tiling scheme over the full EPSG:4326 extent.
///
/// Level 0 splits the world into two root tiles (west and east hemisphere);
/// each level doubles the tile count on both axes. Tile `y` counts from the
/// north edge down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeographicTilingScheme;

impl GeographicTilingScheme {
    /// Number of tile columns at `level`.
    pub fn tiles_x(&self, level: u32) -> u32 {
        2 << level
    }

    /// Number of tile rows at `level`.
    pub fn tiles_y(&self, level: u32) -> u32 {
        1 << level
    }

    /// Get the geographic rectangle covered by tile `(x, y)` at `level`.
    pub fn tile_rectangle(&self, x: u32, y: u32, level: u32) -> Rectangle {
        let tile_width = 360.0 / f64::from(self.tiles_x(level));
        let tile_height = 180.0 / f64::from(self.tiles_y(level));

        let west = -180.0 + f64::from(x) * tile_width;
        let north = 90.0 - f64::from(y) * tile_height;
        Rectangle {
            west,
            south: north - tile_height,
            east: west + tile_width,
            north,
        }
    }
}
