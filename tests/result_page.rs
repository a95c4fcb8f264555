use secret_santa::result_page::{Navigation, ResultPage, ResultPageState};


fn shown_page() -> ResultPage {
    let mut page = ResultPage::new(2);
    page.on_page_show();
    page
}

#[test]
fn page_show_opens_gate() {
    let page = shown_page();
    assert_eq!(page.state(), ResultPageState::Hidden);
    assert!(page.is_modal_open());
    assert!(!page.is_content_visible());
}

#[test]
fn confirm_reveals_content() {
    let mut page = shown_page();
    page.confirm();
    assert!(page.is_content_visible());
    assert!(!page.is_modal_open());
}

#[test]
fn decline_goes_to_overview() {
    let mut page = shown_page();
    assert_eq!(page.decline(), Navigation::ExchangeOverview);
    assert_eq!(Navigation::ExchangeOverview.href(), "../");
    assert!(!page.is_content_visible());
}

#[test]
fn page_show_rearms_gate() {
    let mut page = shown_page();
    page.confirm();
    // E.g. navigating away and then back, with the page restored from the back/forward cache.
    page.on_page_show();
    assert_eq!(page.state(), ResultPageState::Hidden);
    assert!(page.is_modal_open());
    assert!(!page.is_content_visible());
}

#[test]
fn spoilers_reveal_one_way() {
    let mut page = shown_page();
    assert!(!page.is_spoiler_revealed(1));
    assert!(page.reveal_spoiler(1));
    assert!(page.is_spoiler_revealed(1));
    assert!(!page.is_spoiler_revealed(0));
    page.on_page_show();
    assert!(page.is_spoiler_revealed(1));
    assert!(!page.reveal_spoiler(7));
}
