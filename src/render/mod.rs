/// usvg/resvg rasterization of diagrams to RGBA images and PNG files.
pub mod raster;
