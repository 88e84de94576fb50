use std::path::PathBuf;

use crate::error::ConvertError;
use crate::processor::Converter;
use crate::request::ConversionRequest;
use crate::resolve::resolve;

/// Resolve `request` against the converter's registry, then convert.
pub fn run(converter: &dyn Converter, request: ConversionRequest) -> Result<PathBuf, ConvertError> {
    let resolved = resolve(request, converter.registry())?;
    converter.convert(&resolved).inspect_err(|e| {
        log::error!(
            "Error converting {} to {}: {}",
            resolved.input_path.display(),
            resolved.format.name,
            e
        );
    })
}
