//! Best-effort extraction of layout directives from a planning reply.
//!
//! The planning model is asked to lead its answer with `POST_TYPE:` and
//! `IMAGE_COUNT:` lines but usually-not-always follows the format, so every
//! failure path here resolves to a default instead of an error.

use crate::models::post::PostType;

pub const CAROUSEL_MIN: u8 = 2;
pub const CAROUSEL_MAX: u8 = 10;
pub const CAROUSEL_DEFAULT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanDirectives {
    pub post_type: PostType,
    pub image_count: u8,
}

/// Scans for the first `POST_TYPE:` line. A `CAROUSEL` keyword on that line
/// selects a carousel; anything else, or no marker at all, means single.
#[must_use]
pub fn post_type(plan: &str) -> PostType {
    for line in plan.lines() {
        let upper = line.to_uppercase();
        if upper.contains("POST_TYPE:") {
            if upper.contains("CAROUSEL") {
                return PostType::Carousel;
            }
            return PostType::Single;
        }
    }
    PostType::Single
}

/// Scans for the first `IMAGE_COUNT:` line and parses the first contiguous
/// digit run on it, clamped into the carousel range.
#[must_use]
pub fn image_count(plan: &str) -> u8 {
    for line in plan.lines() {
        if !line.to_uppercase().contains("IMAGE_COUNT:") {
            continue;
        }

        let digits: String = line
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();

        if digits.is_empty() {
            return CAROUSEL_DEFAULT;
        }

        // A run too long for u64 is still just "a very large count".
        #[allow(clippy::cast_possible_truncation)]
        return digits.parse::<u64>().map_or(CAROUSEL_MAX, |n| {
            n.clamp(u64::from(CAROUSEL_MIN), u64::from(CAROUSEL_MAX)) as u8
        });
    }
    CAROUSEL_DEFAULT
}

#[must_use]
pub fn parse(plan: &str) -> PlanDirectives {
    let post_type = post_type(plan);
    let image_count = match post_type {
        PostType::Single => 1,
        PostType::Carousel => image_count(plan),
    };
    PlanDirectives {
        post_type,
        image_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_type_defaults_to_single() {
        assert_eq!(post_type("no marker anywhere"), PostType::Single);
        assert_eq!(post_type("POST_TYPE: SINGLE\nrest"), PostType::Single);
        assert_eq!(post_type("POST_TYPE: something else"), PostType::Single);
        assert_eq!(post_type(""), PostType::Single);
    }

    #[test]
    fn test_post_type_carousel() {
        assert_eq!(post_type("POST_TYPE: CAROUSEL"), PostType::Carousel);
        assert_eq!(post_type("post_type: carousel (5 slides)"), PostType::Carousel);
        assert_eq!(
            post_type("Plan:\nPOST_TYPE: CAROUSEL\nIMAGE_COUNT: 4"),
            PostType::Carousel
        );
    }

    #[test]
    fn test_post_type_first_marker_wins() {
        // Only the first marker line is consulted.
        assert_eq!(
            post_type("POST_TYPE: SINGLE\nPOST_TYPE: CAROUSEL"),
            PostType::Single
        );
    }

    #[test]
    fn test_image_count_clamps() {
        assert_eq!(image_count("IMAGE_COUNT: 4"), 4);
        assert_eq!(image_count("IMAGE_COUNT: 247"), 10);
        assert_eq!(image_count("IMAGE_COUNT: 1"), 2);
        assert_eq!(image_count("image_count: 99999999999999999999999"), 10);
    }

    #[test]
    fn test_image_count_defaults() {
        assert_eq!(image_count("IMAGE_COUNT: lots"), 3);
        assert_eq!(image_count("no marker"), 3);
        assert_eq!(image_count(""), 3);
    }

    #[test]
    fn test_image_count_first_digit_run() {
        assert_eq!(image_count("IMAGE_COUNT: 4 (or maybe 5)"), 4);
    }

    #[test]
    fn test_parse_single_is_one_image() {
        let directives = parse("POST_TYPE: SINGLE\nIMAGE_COUNT: 7");
        assert_eq!(directives.post_type, PostType::Single);
        assert_eq!(directives.image_count, 1);
    }

    #[test]
    fn test_parse_carousel() {
        let directives = parse("POST_TYPE: CAROUSEL\nIMAGE_COUNT: 6\nplan body");
        assert_eq!(directives.post_type, PostType::Carousel);
        assert_eq!(directives.image_count, 6);
    }

    #[test]
    fn test_parse_carousel_without_count() {
        let directives = parse("POST_TYPE: CAROUSEL\nno count line");
        assert_eq!(directives.image_count, CAROUSEL_DEFAULT);
    }
}
