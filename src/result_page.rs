// The page that shows a participant whom they are gifting. The result is a secret, so before
// showing it the page asks "Are you <name>?" in a modal dialog. Whoever answers "no" is sent back
// to the exchange overview.
//
// The gate is re-armed on every page show, including restores from the back/forward cache, so the
// result cannot be peeked at by navigating back to an already revealed page.


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ResultPageState {
    Hidden,
    Revealed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Navigation {
    ExchangeOverview,
}

impl Navigation {
    pub fn href(self) -> &'static str {
        match self {
            Navigation::ExchangeOverview => "../",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResultPage {
    state: ResultPageState,
    modal_open: bool,
    spoilers_revealed: Vec<bool>,
}

impl ResultPage {
    pub fn new(num_spoilers: usize) -> Self {
        ResultPage {
            state: ResultPageState::Hidden,
            modal_open: false,
            spoilers_revealed: vec![false; num_spoilers],
        }
    }

    pub fn state(&self) -> ResultPageState { self.state }
    pub fn is_modal_open(&self) -> bool { self.modal_open }
    pub fn is_content_visible(&self) -> bool { self.state == ResultPageState::Revealed }

    pub fn on_page_show(&mut self) {
        self.state = ResultPageState::Hidden;
        self.modal_open = true;
    }

    pub fn confirm(&mut self) {
        self.state = ResultPageState::Revealed;
        self.modal_open = false;
    }

    pub fn decline(&mut self) -> Navigation {
        self.modal_open = false;
        Navigation::ExchangeOverview
    }

    pub fn is_spoiler_revealed(&self, index: usize) -> bool {
        self.spoilers_revealed.get(index).copied().unwrap_or(false)
    }

    // Returns false if there is no such spoiler. Revealing is one-way.
    pub fn reveal_spoiler(&mut self, index: usize) -> bool {
        match self.spoilers_revealed.get_mut(index) {
            Some(revealed) => {
                *revealed = true;
                true
            }
            None => false,
        }
    }
}
