//! Page features and the elements they bind to.
//!
//! The page shell is an external collaborator. Each feature names the element
//! IDs it needs; the DOM layer binds a feature only when all of them exist and
//! reports a missing one once instead of failing the page.

/// A DOM-bound page feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Viewer,
    MdPick,
    PopularSlider,
    PopularMore,
    NewSlider,
    NewMore,
    Detail,
    Search,
    Cart,
    CartToast,
}

impl Feature {
    /// Every feature, in initialization order.
    pub const ALL: [Self; 10] = [
        Self::Viewer,
        Self::MdPick,
        Self::NewSlider,
        Self::NewMore,
        Self::PopularSlider,
        Self::PopularMore,
        Self::Detail,
        Self::Search,
        Self::Cart,
        Self::CartToast,
    ];

    /// Human-readable name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Viewer => "3d viewer",
            Self::MdPick => "md pick",
            Self::PopularSlider => "popular slider",
            Self::PopularMore => "popular show-more",
            Self::NewSlider => "new arrivals slider",
            Self::NewMore => "new arrivals show-more",
            Self::Detail => "detail modal",
            Self::Search => "search",
            Self::Cart => "cart",
            Self::CartToast => "cart notice",
        }
    }

    /// Element IDs the feature needs.
    #[must_use]
    pub const fn element_ids(self) -> &'static [&'static str] {
        match self {
            Self::Viewer => &[ids::BAG_CANVAS],
            Self::MdPick => &[ids::MD_NAME, ids::MD_PRICE],
            Self::PopularSlider => &[
                ids::POPULAR_TRACK,
                ids::POPULAR_VIEWPORT,
                ids::POPULAR_PREV,
                ids::POPULAR_NEXT,
            ],
            Self::PopularMore => &[
                ids::POPULAR_MORE_BTN,
                ids::POPULAR_MORE_MODAL,
                ids::POPULAR_MORE_CLOSE,
                ids::POPULAR_MORE_GRID,
            ],
            Self::NewSlider => &[ids::NEW_TRACK, ids::NEW_VIEWPORT, ids::NEW_PREV, ids::NEW_NEXT],
            Self::NewMore => &[
                ids::NEW_MORE_BTN,
                ids::NEW_MORE_MODAL,
                ids::NEW_MORE_CLOSE,
                ids::NEW_MORE_GRID,
            ],
            Self::Detail => &[
                ids::DETAIL_MODAL,
                ids::DETAIL_NAME,
                ids::DETAIL_PRICE,
                ids::DETAIL_DESC,
                ids::DETAIL_IMG,
                ids::DETAIL_CLOSE,
                ids::DETAIL_ADD,
            ],
            Self::Search => &[
                ids::SEARCH_BAR,
                ids::SEARCH_INPUT,
                ids::SEARCH_TOGGLE,
                ids::SEARCH_CLOSE,
            ],
            Self::Cart => &[
                ids::CART_BTN,
                ids::CART_BADGE,
                ids::CART_SIDEBAR,
                ids::CART_OVERLAY,
                ids::CART_CLOSE,
                ids::CART_ITEMS,
                ids::CART_EMPTY,
                ids::CART_TOTAL,
            ],
            Self::CartToast => &[ids::CART_TOAST, ids::CART_TOAST_CLOSE],
        }
    }
}

/// Element IDs of the page shell.
pub mod ids {
    pub const BAG_CANVAS: &str = "bagCanvas";

    pub const MD_NAME: &str = "mdName";
    pub const MD_PRICE: &str = "mdPrice";

    pub const POPULAR_TRACK: &str = "popularTrack";
    pub const POPULAR_VIEWPORT: &str = "sliderViewport";
    pub const POPULAR_PREV: &str = "prevBtn";
    pub const POPULAR_NEXT: &str = "nextBtn";
    pub const POPULAR_MORE_BTN: &str = "moreBtn";
    pub const POPULAR_MORE_MODAL: &str = "moreModal";
    pub const POPULAR_MORE_CLOSE: &str = "closeModalBtn";
    pub const POPULAR_MORE_GRID: &str = "modalGrid";

    pub const NEW_TRACK: &str = "newTrack";
    pub const NEW_VIEWPORT: &str = "newSliderViewport";
    pub const NEW_PREV: &str = "newPrevBtn";
    pub const NEW_NEXT: &str = "newNextBtn";
    pub const NEW_MORE_BTN: &str = "newMoreBtn";
    pub const NEW_MORE_MODAL: &str = "newMoreModal";
    pub const NEW_MORE_CLOSE: &str = "closeNewModalBtn";
    pub const NEW_MORE_GRID: &str = "newModalGrid";

    pub const DETAIL_MODAL: &str = "detailModal";
    pub const DETAIL_NAME: &str = "detailName";
    pub const DETAIL_PRICE: &str = "detailPrice";
    pub const DETAIL_DESC: &str = "detailDesc";
    pub const DETAIL_IMG: &str = "detailImg";
    pub const DETAIL_CLOSE: &str = "closeDetailBtn";
    pub const DETAIL_ADD: &str = "detailAddToCartBtn";

    pub const SEARCH_BAR: &str = "searchBar";
    pub const SEARCH_INPUT: &str = "searchInput";
    pub const SEARCH_TOGGLE: &str = "searchToggleBtn";
    pub const SEARCH_CLOSE: &str = "closeSearchBtn";

    pub const CART_BTN: &str = "cartBtn";
    pub const CART_BADGE: &str = "cartBadge";
    pub const CART_SIDEBAR: &str = "cartSidebar";
    pub const CART_OVERLAY: &str = "cartOverlay";
    pub const CART_CLOSE: &str = "closeCartBtn";
    pub const CART_ITEMS: &str = "cartItems";
    pub const CART_EMPTY: &str = "cartEmpty";
    pub const CART_TOTAL: &str = "cartTotal";

    pub const CART_TOAST: &str = "cartToast";
    pub const CART_TOAST_CLOSE: &str = "cartToastCloseBtn";
}

/// CSS classes the DOM layer reads or toggles.
pub mod classes {
    pub const PRODUCT_CARD: &str = "product-card";
    pub const PRODUCT_CARD_IMG: &str = "product-card__img";
    pub const PRODUCT_CARD_BODY: &str = "product-card__body";
    pub const PRODUCT_CARD_NAME: &str = "product-card__name";
    pub const PRODUCT_CARD_PRICE: &str = "product-card__price";
    pub const QUICK_ADD: &str = "btn--ghost";
    pub const SWATCH: &str = "swatch";
    pub const STAGE_HINT: &str = "stage__hint";
    pub const ACTIVE: &str = "active";
    pub const OPEN: &str = "open";
    pub const PLACEHOLDER: &str = "placeholder-glyph";
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_ids_are_unique_across_features() {
        let mut seen = HashSet::new();
        for feature in Feature::ALL {
            for id in feature.element_ids() {
                assert!(seen.insert(*id), "{id} is claimed twice");
            }
        }
    }

    #[test]
    fn test_every_feature_needs_something() {
        for feature in Feature::ALL {
            assert!(!feature.element_ids().is_empty(), "{}", feature.name());
        }
    }
}
