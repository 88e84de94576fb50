use std::borrow::Cow;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat as ImgFormat};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};

use crate::config::Quality;
use crate::error::ConvertError;
use crate::format::{FormatSpec, MediaKind};
use crate::processor::Converter;
use crate::request::ResolvedRequest;

/// Largest edge an ICO entry may have.
const ICO_MAX_EDGE: u32 = 256;
/// ravif speed: 1 (slowest) to 10 (fastest)
const AVIF_SPEED: u8 = 6;

/// Converts still images in-process with the `image` codecs.
pub struct ImageConverter;

impl Converter for ImageConverter {
    fn kind(&self) -> MediaKind {
        MediaKind::Image
    }

    fn convert(&self, request: &ResolvedRequest) -> Result<PathBuf, ConvertError> {
        let data = fs::read(&request.input_path).map_err(|e| {
            ConvertError::EngineError(format!(
                "failed to read {}: {}",
                request.input_path.display(),
                e
            ))
        })?;

        let converted = convert_image(&data, request.format, request.quality)?;

        fs::write(&request.output_path, &converted).map_err(|e| {
            ConvertError::EngineError(format!(
                "failed to write {}: {}",
                request.output_path.display(),
                e
            ))
        })?;

        Ok(request.output_path.clone())
    }
}

/// Decode `input` (format sniffed from content) and encode it as `target`.
/// `quality` only applies to lossy targets.
pub fn convert_image(
    input: &[u8],
    target: &FormatSpec,
    quality: Quality,
) -> Result<Vec<u8>, ConvertError> {
    let img = image::load_from_memory(input)
        .map_err(|e| ConvertError::EngineError(format!("failed to load image: {}", e)))?;

    log::debug!(
        "Converting image: {}x{} pixels ({:?}) to {}",
        img.width(),
        img.height(),
        img.color(),
        target.display_name()
    );

    let output = match target.name {
        "jpeg" => encode_jpeg(&img, quality)?,
        "webp" => encode_webp(&img, quality)?,
        "pdf" => encode_pdf(&img, quality)?,
        "avif" => encode_avif(&img, quality)?,
        "ico" => encode_with(&fit_icon(&img), ImgFormat::Ico)?,
        "png" | "tiff" => encode_with(&without_float(&img), engine_format(target)?)?,
        _ => encode_with(&DynamicImage::ImageRgba8(img.to_rgba8()), engine_format(target)?)?,
    };

    log::debug!(
        "Conversion complete: {} bytes ({})",
        output.len(),
        target.display_name()
    );

    Ok(output)
}

fn engine_format(target: &FormatSpec) -> Result<ImgFormat, ConvertError> {
    ImgFormat::from_extension(target.default_extension()).ok_or_else(|| {
        ConvertError::EngineError(format!("no encoder available for {}", target.display_name()))
    })
}

fn encode_with(img: &DynamicImage, format: ImgFormat) -> Result<Vec<u8>, ConvertError> {
    let mut output = Vec::new();
    img.write_to(&mut Cursor::new(&mut output), format)
        .map_err(|e| ConvertError::EngineError(format!("failed to encode {:?}: {}", format, e)))?;
    Ok(output)
}

fn encode_jpeg(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>, ConvertError> {
    let mut output = Vec::new();
    let mut cursor = Cursor::new(&mut output);

    // JPEG has no alpha channel
    let rgb = img.to_rgb8();

    let mut encoder = JpegEncoder::new_with_quality(&mut cursor, quality.value());
    encoder
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), image::ExtendedColorType::Rgb8)
        .map_err(|e| ConvertError::EngineError(format!("failed to encode JPEG: {}", e)))?;

    Ok(output)
}

fn encode_webp(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>, ConvertError> {
    let rgba = img.to_rgba8();
    let (width, height) = img.dimensions();

    // libwebp rejects edges over 16383 px
    let encoded = webp::Encoder::from_rgba(rgba.as_raw(), width, height)
        .encode_simple(false, quality.value() as f32)
        .map_err(|e| ConvertError::EngineError(format!("failed to encode WebP: {:?}", e)))?;

    Ok(encoded.to_vec())
}

/// Single-page PDF with the image embedded as a JPEG stream, one point per pixel.
fn encode_pdf(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>, ConvertError> {
    let jpeg = encode_jpeg(img, quality)?;
    let (width, height) = img.dimensions();
    let (page_w, page_h) = (width as f32, height as f32);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let image_name = Name(b"Im1");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut image = pdf.image_xobject(image_id, &jpeg);
    image.filter(Filter::DctDecode);
    image.width(width as i32);
    image.height(height as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([page_w, 0.0, 0.0, page_h, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    Ok(pdf.finish())
}

fn encode_avif(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>, ConvertError> {
    let mut output = Vec::new();
    let encoder = AvifEncoder::new_with_speed_quality(&mut output, AVIF_SPEED, quality.value());
    DynamicImage::ImageRgba8(img.to_rgba8())
        .write_with_encoder(encoder)
        .map_err(|e| ConvertError::EngineError(format!("failed to encode AVIF: {}", e)))?;
    Ok(output)
}

/// Downscale to the ICO size limit, keeping the aspect ratio.
fn fit_icon(img: &DynamicImage) -> DynamicImage {
    let (width, height) = img.dimensions();
    let img = if width > ICO_MAX_EDGE || height > ICO_MAX_EDGE {
        log::debug!("Downscaling {}x{} to fit an icon", width, height);
        img.thumbnail(ICO_MAX_EDGE, ICO_MAX_EDGE)
    } else {
        img.clone()
    };
    DynamicImage::ImageRgba8(img.to_rgba8())
}

/// PNG and TIFF keep 16-bit data but cannot store floats.
fn without_float(img: &DynamicImage) -> Cow<'_, DynamicImage> {
    match img.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => {
            Cow::Owned(DynamicImage::ImageRgba16(img.to_rgba16()))
        }
        _ => Cow::Borrowed(img),
    }
}
