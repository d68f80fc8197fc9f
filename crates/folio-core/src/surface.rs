#![forbid(unsafe_code)]

//! The page capability the controller drives.
//!
//! The controller never touches a document directly. Everything it can
//! change on screen goes through [`Surface`], which the web front end
//! implements over the DOM and tests implement with a recorder.

use crate::section::Section;
use crate::state::Layout;

/// Writable regions and indicators of the page shell.
pub trait Surface {
    /// Show `layout` and hide the other shell.
    fn show_layout(&mut self, layout: Layout);

    /// Mark the navigation button for `section` active and clear the rest.
    fn set_active_section(&mut self, section: Section);

    /// Show or hide the sidebar and chapter navigation. Hiding them also
    /// widens the content pane.
    fn set_book_chrome_visible(&mut self, visible: bool);

    /// Replace the content pane body.
    fn set_content(&mut self, html: &str);

    fn scroll_content_to_top(&mut self);

    /// Replace the sidebar link list.
    fn set_links(&mut self, html: &str);

    /// Put `markup` into both logo slots, keeping the header subtitle (or
    /// creating one reading `subtitle`).
    fn set_logo(&mut self, markup: &str, subtitle: &str);

    /// Rewrite the address bar search string without reloading.
    fn push_location(&mut self, search: &str);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn show_layout(&mut self, layout: Layout) {
        (**self).show_layout(layout);
    }

    fn set_active_section(&mut self, section: Section) {
        (**self).set_active_section(section);
    }

    fn set_book_chrome_visible(&mut self, visible: bool) {
        (**self).set_book_chrome_visible(visible);
    }

    fn set_content(&mut self, html: &str) {
        (**self).set_content(html);
    }

    fn scroll_content_to_top(&mut self) {
        (**self).scroll_content_to_top();
    }

    fn set_links(&mut self, html: &str) {
        (**self).set_links(html);
    }

    fn set_logo(&mut self, markup: &str, subtitle: &str) {
        (**self).set_logo(markup, subtitle);
    }

    fn push_location(&mut self, search: &str) {
        (**self).push_location(search);
    }
}
