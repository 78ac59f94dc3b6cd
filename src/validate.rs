//! Field validators for planet input.
//!
//! Validators are pure. Each failure is a [`ValidationError`]; its `Display`
//! text is for logs, while [`ValidationError::message`] renders the
//! user-facing text in the requested [`Locale`].

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::camera::Point;
use crate::consts::{DESCRIPTION_MAX_LENGTH, MAX_IMAGE_BYTES, MAX_SIZE, MIN_SIZE, NAME_MAX_LENGTH};
use crate::image::ImageFile;
use crate::planet::{NewPlanet, PlanetPatch};

/// Language for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Spanish, the portal's interface language.
    #[default]
    Es,
    En,
}

/// Why a planet field was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required")]
    NameRequired,
    #[error("name exceeds {max} characters", max = NAME_MAX_LENGTH)]
    NameTooLong,
    #[error("description is required")]
    DescriptionRequired,
    #[error("description exceeds {max} characters", max = DESCRIPTION_MAX_LENGTH)]
    DescriptionTooLong,
    #[error("image is required")]
    ImageRequired,
    #[error("file is not an image: {0}")]
    NotAnImage(String),
    #[error("image is {0} bytes, limit is {max}", max = MAX_IMAGE_BYTES)]
    ImageTooLarge(u64),
    #[error("size {0} is outside {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    SizeOutOfRange(f64),
    #[error("position ({x}, {y}) is not finite")]
    PositionNotFinite { x: f64, y: f64 },
}

impl ValidationError {
    /// User-facing message in `locale`.
    #[must_use]
    pub fn message(&self, locale: Locale) -> String {
        let max_mb = MAX_IMAGE_BYTES / (1024 * 1024);
        match (locale, self) {
            (Locale::Es, Self::NameRequired) => "El nombre es requerido".to_owned(),
            (Locale::Es, Self::NameTooLong) => {
                format!("El nombre no puede exceder {NAME_MAX_LENGTH} caracteres")
            }
            (Locale::Es, Self::DescriptionRequired) => "La descripción es requerida".to_owned(),
            (Locale::Es, Self::DescriptionTooLong) => {
                format!("La descripción no puede exceder {DESCRIPTION_MAX_LENGTH} caracteres")
            }
            (Locale::Es, Self::ImageRequired) => "La imagen es requerida".to_owned(),
            (Locale::Es, Self::NotAnImage(_)) => "El archivo debe ser una imagen".to_owned(),
            (Locale::Es, Self::ImageTooLarge(_)) => format!("La imagen no puede exceder {max_mb}MB"),
            (Locale::Es, Self::SizeOutOfRange(_)) => {
                format!("El tamaño debe estar entre {MIN_SIZE} y {MAX_SIZE}")
            }
            (Locale::Es, Self::PositionNotFinite { .. }) => "La posición debe ser un número válido".to_owned(),
            (Locale::En, Self::NameRequired) => "Name is required".to_owned(),
            (Locale::En, Self::NameTooLong) => format!("Name cannot exceed {NAME_MAX_LENGTH} characters"),
            (Locale::En, Self::DescriptionRequired) => "Description is required".to_owned(),
            (Locale::En, Self::DescriptionTooLong) => {
                format!("Description cannot exceed {DESCRIPTION_MAX_LENGTH} characters")
            }
            (Locale::En, Self::ImageRequired) => "Image is required".to_owned(),
            (Locale::En, Self::NotAnImage(_)) => "File must be an image".to_owned(),
            (Locale::En, Self::ImageTooLarge(_)) => format!("Image cannot exceed {max_mb}MB"),
            (Locale::En, Self::SizeOutOfRange(_)) => {
                format!("Size must be between {MIN_SIZE} and {MAX_SIZE}")
            }
            (Locale::En, Self::PositionNotFinite { .. }) => "Position must be a valid number".to_owned(),
        }
    }
}

/// Name must contain a non-whitespace character and fit in 50 characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    Ok(())
}

/// Description must contain a non-whitespace character and fit in 500 characters.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    if description.chars().count() > DESCRIPTION_MAX_LENGTH {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(())
}

/// An image must be present, declare an `image/*` media type, and weigh at most 2 MiB.
pub fn validate_image(file: Option<&ImageFile>) -> Result<(), ValidationError> {
    let Some(file) = file else {
        return Err(ValidationError::ImageRequired);
    };
    if !file.is_image() {
        return Err(ValidationError::NotAnImage(file.media_type.clone()));
    }
    if file.size() > MAX_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge(file.size()));
    }
    Ok(())
}

pub fn validate_size(size: f64) -> Result<(), ValidationError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(ValidationError::SizeOutOfRange(size));
    }
    Ok(())
}

/// Both coordinates must be finite. NaN and infinities cannot be stored as JSON numbers.
pub fn validate_position(position: Point) -> Result<(), ValidationError> {
    if position.x.is_finite() && position.y.is_finite() {
        return Ok(());
    }
    Err(ValidationError::PositionNotFinite { x: position.x, y: position.y })
}

/// Validate every user-editable field of a new planet. The image is checked
/// before ingestion, so only its resulting reference's presence is checked here.
pub fn validate_new_planet(planet: &NewPlanet) -> Result<(), ValidationError> {
    validate_name(&planet.name)?;
    validate_description(&planet.description)?;
    if planet.image_url.trim().is_empty() {
        return Err(ValidationError::ImageRequired);
    }
    validate_position(planet.position)?;
    validate_size(planet.size)
}

/// Validate the fields a patch would change. Absent fields are not checked.
pub fn validate_patch(patch: &PlanetPatch) -> Result<(), ValidationError> {
    if let Some(ref name) = patch.name {
        validate_name(name)?;
    }
    if let Some(ref description) = patch.description {
        validate_description(description)?;
    }
    if patch.image_url.as_ref().is_some_and(|url| url.trim().is_empty()) {
        return Err(ValidationError::ImageRequired);
    }
    if let Some(position) = patch.position {
        validate_position(position)?;
    }
    if let Some(size) = patch.size {
        validate_size(size)?;
    }
    Ok(())
}
