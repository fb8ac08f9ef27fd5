//! Cairo surfaces for preview rasters

use cairo::{Context, Format, ImageSurface};
use fontview_core::PreviewImage;

/// Pack premultiplied RGBA rows into cairo's native-endian ARGB32 layout.
fn argb32_rows(image: &PreviewImage, stride: usize) -> Vec<u8> {
    let width = image.width() as usize;
    let mut data = vec![0u8; stride * image.height() as usize];
    for (row, src_row) in image.pixels().chunks_exact(width * 4).enumerate() {
        let dst_row = &mut data[row * stride..row * stride + width * 4];
        for (dst, px) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            let argb = u32::from(px[3]) << 24
                | u32::from(px[0]) << 16
                | u32::from(px[1]) << 8
                | u32::from(px[2]);
            dst.copy_from_slice(&argb.to_ne_bytes());
        }
    }
    data
}

/// Image surface carrying the preview's device scale, so it paints at logical size.
pub fn preview_surface(image: &PreviewImage) -> Result<ImageSurface, cairo::Error> {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let stride = Format::ARgb32.stride_for_width(image.width())?;

    let surface = ImageSurface::create_for_data(
        argb32_rows(image, stride as usize),
        Format::ARgb32,
        width,
        height,
        stride,
    )?;
    surface.set_device_scale(image.scale(), image.scale());
    Ok(surface)
}

pub fn paint_preview(cr: &Context, image: &PreviewImage) -> Result<(), cairo::Error> {
    let surface = preview_surface(image)?;
    cr.set_source_surface(&surface, 0.0, 0.0)?;
    cr.paint()
}
