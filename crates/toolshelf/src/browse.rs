//! Interactive browsing
//!
//! Each input line is one user action. The [`Browser`] forwards it to the core
//! session or the shelf, then re-renders whatever changed.

use crate::prelude::{eprintln, *};
use crate::render::{present, renderer_for, Renderer};
use crate::shelf::{parse_tool_id, Shelf};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use toolshelf_core::catalogue::ToolId;
use toolshelf_core::query::ALL_CATEGORIES;
use toolshelf_core::session::Session;
use toolshelf_core::stats::summarize;

const PROMPT: &str = "toolshelf> ";

const HELP: &str = "\
Commands:
  search <text>      Filter by name, description, category or feature (no text clears)
  category <name>    Show one category (no name shows all)
  sort <key>         popularity, name, recent or category
  more               Load the next page
  show               Show the current page again
  bookmark <id>      Toggle a bookmark
  info <id>          Show tool details
  try <id>           Print the tool's link
  open <id>          Open the tool's link in the browser
  categories         List categories
  stats              Show catalogue totals
  theme              Toggle light/dark
  help               Show this help
  quit               Leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search(String),
    Category(String),
    Sort(String),
    More,
    Show,
    Bookmark(ToolId),
    Info(ToolId),
    Try(ToolId),
    Open(ToolId),
    Categories,
    Stats,
    Theme,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_action(line: &str) -> Result<Option<Action>> {
    let words = shlex::split(line).ok_or_eyre("Unbalanced quotes in input")?;
    let Some((command, args)) = words.split_first() else {
        return Ok(None);
    };

    let action = match command.to_lowercase().as_str() {
        "search" | "s" | "/" => Action::Search(args.join(" ")),
        "category" | "c" => {
            if args.is_empty() {
                Action::Category(ALL_CATEGORIES.to_string())
            } else {
                Action::Category(args.join(" "))
            }
        }
        "sort" => Action::Sort(args.first().cloned().unwrap_or_default()),
        "more" | "m" => Action::More,
        "show" | "ls" => Action::Show,
        "bookmark" | "b" => Action::Bookmark(id_arg(args)?),
        "info" | "i" => Action::Info(id_arg(args)?),
        "try" | "t" => Action::Try(id_arg(args)?),
        "open" | "o" => Action::Open(id_arg(args)?),
        "categories" => Action::Categories,
        "stats" => Action::Stats,
        "theme" => Action::Theme,
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        other => return Err(eyre!("Unknown command: {}. Type `help`.", other)),
    };

    Ok(Some(action))
}

fn id_arg(args: &[String]) -> Result<ToolId> {
    let arg = args.first().ok_or_eyre("Missing tool id")?;
    parse_tool_id(arg)
}

/// The presentation adapter: owns the session state and the renderer
pub struct Browser<'a> {
    shelf: &'a mut Shelf,
    session: Session,
    renderer: Box<dyn Renderer>,
}

impl<'a> Browser<'a> {
    pub fn new(shelf: &'a mut Shelf, renderer: Box<dyn Renderer>) -> Self {
        let session = shelf.session();
        Self {
            shelf,
            session,
            renderer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Initial screen: totals, category bar and the first page
    pub fn start(&mut self) -> Result<()> {
        self.renderer
            .render_stats(&summarize(self.shelf.catalogue.tools()))?;
        self.render_categories()?;
        self.render_page()
    }

    pub fn handle(&mut self, action: Action) -> Result<Flow> {
        log::debug!("Browse action: {:?}", action);

        match action {
            Action::Search(text) => {
                self.session.on_search_change(text);
                self.render_page()?;
            }
            Action::Category(category) => {
                self.session.on_category_change(category);
                self.render_page()?;
            }
            Action::Sort(key) => {
                self.session.on_sort_change(&key);
                self.render_page()?;
            }
            Action::More => {
                let view = self.session.view(self.shelf.catalogue.tools());
                if view.has_more {
                    self.session.on_load_more();
                    self.render_page()?;
                } else {
                    self.renderer.render_message("Nothing more to load")?;
                }
            }
            Action::Show => self.render_page()?,
            Action::Bookmark(id) => {
                let bookmarked = self.shelf.toggle_bookmark(id)?;
                let name = self.shelf.tool(id)?.name.clone();
                self.renderer
                    .render_message(&crate::bookmark::toggle_message(&name, bookmarked))?;
            }
            Action::Info(id) => {
                let tool = self
                    .session
                    .on_info_request(&self.shelf.catalogue, id)
                    .ok_or(Error::ToolNotFound(id))?;
                self.renderer
                    .render_details(tool, self.shelf.bookmarks.contains(id))?;
            }
            Action::Try(id) => {
                let link = self.try_link(id)?.to_string();
                self.renderer.render_message(&link)?;
            }
            Action::Open(id) => {
                let link = self.try_link(id)?.to_string();
                crate::details::open_link(&link)?;
                self.renderer
                    .render_message(&format!("Opened {}", link))?;
            }
            Action::Categories => self.render_categories()?,
            Action::Stats => {
                self.renderer
                    .render_stats(&summarize(self.shelf.catalogue.tools()))?;
            }
            Action::Theme => {
                let theme = self.shelf.toggle_theme()?;
                self.renderer.set_theme(theme);
                self.renderer.render_message(&format!("Theme: {}", theme))?;
            }
            Action::Help => self.renderer.render_message(HELP)?,
            Action::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn try_link(&self, id: ToolId) -> Result<&str> {
        let catalogue = &self.shelf.catalogue;
        if self.session.on_info_request(catalogue, id).is_none() {
            return Err(Error::ToolNotFound(id).into());
        }
        self.session
            .on_try_request(catalogue, id)
            .ok_or_else(|| Error::NoTryLink(id).into())
    }

    fn render_page(&mut self) -> Result<()> {
        present(&mut *self.renderer, &self.session, &*self.shelf)
    }

    fn render_categories(&mut self) -> Result<()> {
        let categories = self.shelf.catalogue.categories();
        self.renderer
            .render_categories(&categories, &self.session.query().category)
    }
}

/// Feed input lines to the browser until EOF or `quit`.
///
/// A bad line is reported and skipped; only I/O failures end the loop early.
pub fn drive<R: BufRead>(browser: &mut Browser, input: R, prompt: bool) -> Result<()> {
    let mut lines = input.lines();

    loop {
        if prompt {
            anstream::print!("{}", PROMPT);
            io::stdout().flush().context("Failed to flush prompt")?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        let outcome = parse_action(&line).and_then(|action| match action {
            Some(action) => browser.handle(action),
            None => Ok(Flow::Continue),
        });

        match outcome {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("{}", format!("{:#}", e).red()),
        }
    }

    Ok(())
}

pub fn run(shelf: &mut Shelf, global: &crate::Global) -> Result<()> {
    let renderer = renderer_for(global, shelf.theme());
    let mut browser = Browser::new(shelf, renderer);

    browser.start()?;
    if !global.json {
        eprintln!("{}", "Type `help` for commands.".dimmed());
    }

    let stdin = io::stdin();
    drive(&mut browser, stdin.lock(), !global.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shelf::tests::bundled_shelf;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;
    use toolshelf_core::bookmarks::BookmarkStore;
    use toolshelf_core::catalogue::ToolRecord;
    use toolshelf_core::query::{QueryState, SortKey};
    use toolshelf_core::session::PageView;
    use toolshelf_core::stats::Stats;
    use toolshelf_core::theme::Theme;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Results(Vec<String>, bool),
        Empty,
        Stats(Stats),
        Details(String, bool),
        Categories(String),
        Message(String),
        Theme(Theme),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Event>>>);

    impl Recorder {
        fn take(&self) -> Vec<Event> {
            self.0.borrow_mut().drain(..).collect()
        }
    }

    impl Renderer for Recorder {
        fn render_results(&mut self, view: &PageView, _: &BookmarkStore) -> Result<()> {
            let names = view.items.iter().map(|t| t.name.clone()).collect();
            self.0.borrow_mut().push(Event::Results(names, view.has_more));
            Ok(())
        }

        fn render_empty_state(&mut self, _: &QueryState) -> Result<()> {
            self.0.borrow_mut().push(Event::Empty);
            Ok(())
        }

        fn render_stats(&mut self, stats: &Stats) -> Result<()> {
            self.0.borrow_mut().push(Event::Stats(*stats));
            Ok(())
        }

        fn render_details(&mut self, tool: &ToolRecord, bookmarked: bool) -> Result<()> {
            self.0
                .borrow_mut()
                .push(Event::Details(tool.name.clone(), bookmarked));
            Ok(())
        }

        fn render_categories(&mut self, _: &[String], selected: &str) -> Result<()> {
            self.0
                .borrow_mut()
                .push(Event::Categories(selected.to_string()));
            Ok(())
        }

        fn render_message(&mut self, message: &str) -> Result<()> {
            self.0.borrow_mut().push(Event::Message(message.to_string()));
            Ok(())
        }

        fn set_theme(&mut self, theme: Theme) {
            self.0.borrow_mut().push(Event::Theme(theme));
        }
    }

    fn action(line: &str) -> Action {
        parse_action(line).unwrap().unwrap()
    }

    // ============================================================================
    // parse_action tests
    // ============================================================================

    #[test]
    fn test_parse_action_blank_line() {
        assert_eq!(parse_action("").unwrap(), None);
        assert_eq!(parse_action("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_action_search_joins_words() {
        assert_eq!(action("search fast hmr"), Action::Search("fast hmr".to_string()));
        assert_eq!(action("search \"end-to-end\""), Action::Search("end-to-end".to_string()));
        assert_eq!(action("search"), Action::Search(String::new()));
    }

    #[test]
    fn test_parse_action_category() {
        assert_eq!(action("category DevOps"), Action::Category("DevOps".to_string()));
        assert_eq!(action("c 'Tailwind Stuff'"), Action::Category("Tailwind Stuff".to_string()));
        assert_eq!(action("category"), Action::Category("All".to_string()));
    }

    #[test]
    fn test_parse_action_ids() {
        assert_eq!(action("bookmark 3"), Action::Bookmark(3));
        assert_eq!(action("INFO 12"), Action::Info(12));
        assert_eq!(action("try 1"), Action::Try(1));
        assert!(parse_action("info").is_err());
        assert!(parse_action("info abc").is_err());
    }

    #[test]
    fn test_parse_action_unknown_command() {
        let err = parse_action("fly away").unwrap_err();
        assert!(err.to_string().contains("Unknown command: fly"));
    }

    #[test]
    fn test_parse_action_unbalanced_quotes() {
        assert!(parse_action("search \"oops").is_err());
    }

    // ============================================================================
    // Browser tests
    // ============================================================================

    #[test]
    fn test_start_renders_stats_categories_and_first_page() {
        let mut shelf = bundled_shelf();
        let recorder = Recorder::default();
        let mut browser = Browser::new(&mut shelf, Box::new(recorder.clone()));

        browser.start().unwrap();
        let events = recorder.take();

        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::Stats(Stats { total: 14, .. })));
        assert_eq!(events[1], Event::Categories("All".to_string()));
        assert!(matches!(&events[2], Event::Results(names, true) if names.len() == 6));
    }

    #[test]
    fn test_more_then_query_change_resets() {
        let mut shelf = bundled_shelf();
        let recorder = Recorder::default();
        let mut browser = Browser::new(&mut shelf, Box::new(recorder.clone()));

        browser.handle(Action::More).unwrap();
        assert_eq!(browser.session().visible_count(), 12);

        browser.handle(Action::Category("Bundlers".to_string())).unwrap();
        assert_eq!(browser.session().visible_count(), 6);

        browser.handle(Action::Sort("name".to_string())).unwrap();
        assert_eq!(browser.session().query().sort_key, SortKey::Name);

        let events = recorder.take();
        assert_eq!(
            events.last(),
            Some(&Event::Results(
                vec!["Rollup".to_string(), "Vite".to_string(), "Webpack".to_string()],
                false
            ))
        );
    }

    #[test]
    fn test_more_without_more_results() {
        let mut shelf = bundled_shelf();
        let recorder = Recorder::default();
        let mut browser = Browser::new(&mut shelf, Box::new(recorder.clone()));

        browser.handle(Action::Search("vite".to_string())).unwrap();
        browser.handle(Action::More).unwrap();

        assert_eq!(browser.session().visible_count(), 6);
        assert_eq!(
            recorder.take().last(),
            Some(&Event::Message("Nothing more to load".to_string()))
        );
    }

    #[test]
    fn test_search_without_matches_renders_empty_state() {
        let mut shelf = bundled_shelf();
        let recorder = Recorder::default();
        let mut browser = Browser::new(&mut shelf, Box::new(recorder.clone()));

        browser.handle(Action::Search("cobol".to_string())).unwrap();
        assert_eq!(recorder.take(), vec![Event::Empty]);
    }

    #[test]
    fn test_bookmark_and_info() {
        let mut shelf = bundled_shelf();
        let recorder = Recorder::default();
        {
            let mut browser = Browser::new(&mut shelf, Box::new(recorder.clone()));
            browser.handle(Action::Bookmark(2)).unwrap();
            browser.handle(Action::Info(2)).unwrap();
        }

        assert_eq!(
            recorder.take(),
            vec![
                Event::Message("Bookmarked Vite".to_string()),
                Event::Details("Vite".to_string(), true),
            ]
        );
        assert!(shelf.bookmarks.contains(2));
    }

    #[test]
    fn test_unknown_tool_is_an_error() {
        let mut shelf = bundled_shelf();
        let mut browser = Browser::new(&mut shelf, Box::new(Recorder::default()));

        assert!(browser.handle(Action::Info(999)).is_err());
        assert!(browser.handle(Action::Bookmark(999)).is_err());
        assert!(browser.handle(Action::Try(14)).is_err());
    }

    #[test]
    fn test_theme_toggle_restyles_renderer() {
        let mut shelf = bundled_shelf();
        let recorder = Recorder::default();
        {
            let mut browser = Browser::new(&mut shelf, Box::new(recorder.clone()));
            browser.handle(Action::Theme).unwrap();
        }

        assert_eq!(
            recorder.take(),
            vec![
                Event::Theme(Theme::Dark),
                Event::Message("Theme: dark".to_string())
            ]
        );
        assert_eq!(shelf.theme(), Theme::Dark);
    }

    #[test]
    fn test_drive_stops_at_quit_and_skips_bad_lines() {
        let mut shelf = bundled_shelf();
        let recorder = Recorder::default();
        let mut browser = Browser::new(&mut shelf, Box::new(recorder.clone()));

        let input = Cursor::new("bogus\n\ntry 2\nquit\ntry 3\n");
        drive(&mut browser, input, false).unwrap();

        assert_eq!(
            recorder.take(),
            vec![Event::Message("https://vitejs.dev".to_string())]
        );
    }

    #[test]
    fn test_drive_until_eof() {
        let mut shelf = bundled_shelf();
        let recorder = Recorder::default();
        let mut browser = Browser::new(&mut shelf, Box::new(recorder.clone()));

        drive(&mut browser, Cursor::new("more\nmore\n"), false).unwrap();

        assert_eq!(browser.session().visible_count(), 18);
        assert_eq!(recorder.take().len(), 2);
    }
}
