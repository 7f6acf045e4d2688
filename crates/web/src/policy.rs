//! Visibility and ownership policy for cards.
//!
//! Pure functions over a fetched card and the requesting identity. `None`
//! is an anonymous visitor. Controllers decide how a denial is surfaced
//! (the public view path renders not-found, the edit path redirects away).

use tapryt_core::UserId;

use crate::models::Card;

/// Whether `viewer` may see the card.
///
/// Public cards are visible to everyone, including anonymous visitors.
/// Private cards are visible only to their owner.
#[must_use]
pub fn can_view(card: &Card, viewer: Option<UserId>) -> bool {
    card.is_public || viewer == Some(card.owner_id)
}

/// Whether `viewer` may edit the card.
///
/// Only the owner may edit, regardless of visibility.
#[must_use]
pub fn can_edit(card: &Card, viewer: Option<UserId>) -> bool {
    viewer == Some(card.owner_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use tapryt_core::{CardId, Slug};

    use super::*;
    use crate::models::{CardDesign, CardProfile};

    fn card(owner: i32, is_public: bool) -> Card {
        Card {
            id: CardId::new(1),
            slug: Slug::parse("bob").unwrap(),
            owner_id: UserId::new(owner),
            is_public,
            profile: CardProfile::default(),
            design: CardDesign::default(),
            view_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            social_links: Vec::new(),
        }
    }

    #[test]
    fn test_public_card_viewable_by_anyone() {
        let card = card(1, true);
        assert!(can_view(&card, None));
        assert!(can_view(&card, Some(UserId::new(1))));
        assert!(can_view(&card, Some(UserId::new(2))));
    }

    #[test]
    fn test_private_card_viewable_only_by_owner() {
        let card = card(1, false);
        assert!(!can_view(&card, None));
        assert!(can_view(&card, Some(UserId::new(1))));
        assert!(!can_view(&card, Some(UserId::new(2))));
    }

    #[test]
    fn test_only_owner_can_edit_regardless_of_visibility() {
        for is_public in [true, false] {
            let card = card(1, is_public);
            assert!(!can_edit(&card, None));
            assert!(can_edit(&card, Some(UserId::new(1))));
            assert!(!can_edit(&card, Some(UserId::new(2))));
        }
    }
}
