//! Locale-aware string collation for task titles.
//!
//! Titles are ordered with the CLDR root collation: base letters first, then
//! diacritics, then case (lowercase before uppercase). Letters with their own
//! alphabet position such as `Ł` or `Ø` sort next to their base letter rather
//! than after `z`.
//!
//! Strings that tie on every level compare equal, so a stable sort keeps
//! their input order.

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use log::warn;
use std::cmp::Ordering;

thread_local! {
    static ROOT_COLLATOR: Option<CollatorBorrowed<'static>> =
        Collator::try_new(CollatorPreferences::default(), CollatorOptions::default())
            .map_err(|err| {
                warn!("event=collator_init module=sort status=error fallback=code_point error={err}");
            })
            .ok();
}

/// Compares two strings using root locale collation.
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    with_collator(|compare| compare(left, right))
}

/// Runs `body` with a title comparator bound to this thread's collator.
///
/// Falls back to code-point order only if collation data failed to load.
pub(crate) fn with_collator<R>(body: impl FnOnce(&dyn Fn(&str, &str) -> Ordering) -> R) -> R {
    ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => body(&|left: &str, right: &str| collator.compare(left, right)),
        None => body(&|left: &str, right: &str| left.cmp(right)),
    })
}

#[cfg(test)]
mod tests {
    use super::locale_compare;
    use std::cmp::Ordering;

    #[test]
    fn case_is_folded_before_tie_break() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Apple", "banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
    }

    #[test]
    fn diacritics_fold_to_base_letters() {
        assert_eq!(locale_compare("école", "ecrire"), Ordering::Less);
        assert_eq!(locale_compare("Zürich", "zebra"), Ordering::Greater);
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
    }

    #[test]
    fn letters_without_decomposition_sort_near_their_base() {
        assert_eq!(locale_compare("Łódź", "Madrid"), Ordering::Less);
        assert_eq!(locale_compare("Lima", "Łódź"), Ordering::Less);
        assert_eq!(locale_compare("Øresund", "Paris"), Ordering::Less);
        assert_eq!(locale_compare("æble", "banana"), Ordering::Less);
    }

    #[test]
    fn accent_order_holds_outside_latin() {
        assert_eq!(locale_compare("ий", "йи"), Ordering::Less);
        assert_eq!(locale_compare("αα", "άα"), Ordering::Less);
    }

    #[test]
    fn precomposed_and_decomposed_forms_are_equal() {
        assert_eq!(locale_compare("caf\u{e9}", "cafe\u{301}"), Ordering::Equal);
    }
}
