//! Photo ranking by popularity and resolution.

use crate::types::{Photo, PhotoSize};
use std::cmp::Reverse;

/// Returns the size variant with the largest pixel area.
///
/// When several variants share the largest area the first one in API order
/// is returned. `None` if the photo has no sizes at all.
pub fn best_size(photo: &Photo) -> Option<&PhotoSize> {
    photo.sizes.iter().reduce(|best, candidate| {
        if candidate.area() > best.area() {
            candidate
        } else {
            best
        }
    })
}

/// Pixel area of the best size variant, 0 for a photo without sizes.
pub fn best_area(photo: &Photo) -> u64 {
    best_size(photo).map(PhotoSize::area).unwrap_or(0)
}

/// Orders photos by likes (descending), then by best-variant area (descending).
///
/// Returns a new vector; the input is left as is. The sort is stable, so
/// photos with equal likes and equal area keep their relative order.
pub fn rank_photos(photos: &[Photo]) -> Vec<Photo> {
    let mut ranked = photos.to_vec();
    ranked.sort_by_cached_key(|photo| {
        (Reverse(photo.likes_count()), Reverse(best_area(photo)))
    });
    ranked
}
