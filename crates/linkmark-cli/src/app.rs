use anyhow::Result;
use linkmark_engine::{
    EditorContext, InlineDocument, InlineHost, InlinePlugin, Key, KeyEvent as EditorKey,
    LinkPlugin, NodeId, PluginRegistry, SignalLog, SurfaceSignal, ToggleOutcome,
};

/// What the keyboard is currently editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Editing,
    /// Collecting a url for a new link, opened by the toggle hotkey. With a
    /// selection the link is already drafted around it.
    LinkPrompt { url: String, draft: Option<NodeId> },
}

/// The scratchpad: one paragraph, the plugins driving it, and what the
/// editing surface was last told.
pub struct App {
    pub doc: InlineDocument,
    pub mode: Mode,
    pub status: String,
    registry: PluginRegistry,
    surface: SignalLog,
    anchor: Option<usize>,
    target: String,
}

impl App {
    pub fn new(plugin: LinkPlugin) -> Result<Self> {
        let target = plugin
            .hotkey()
            .args
            .first()
            .cloned()
            .unwrap_or_default();
        let mut registry = PluginRegistry::new();
        registry.register(Box::new(plugin))?;

        Ok(Self {
            doc: InlineDocument::new(),
            mode: Mode::Editing,
            status: "Type markdown links like [text](url) followed by a space".to_string(),
            registry,
            surface: SignalLog::default(),
            anchor: None,
            target,
        })
    }

    /// Typed character: offered to the plugins first, inserted unless one
    /// of them prevented it.
    pub fn type_char(&mut self, c: char) -> Result<()> {
        if let Mode::LinkPrompt { url, .. } = &mut self.mode {
            url.push(c);
            return Ok(());
        }

        let mut event = EditorKey::new(if c == ' ' { Key::Space } else { Key::Char(c) });
        let handled = self.registry.keystroke(
            &mut EditorContext::new(&mut self.doc, &mut self.surface),
            &mut event,
        )?;
        if handled {
            self.status = "Converted markdown link".to_string();
        }
        if !event.is_default_prevented() {
            let mut buf = [0; 4];
            self.doc.insert_text(c.encode_utf8(&mut buf))?;
        }
        self.edited()
    }

    pub fn backspace(&mut self) -> Result<()> {
        if let Mode::LinkPrompt { url, .. } = &mut self.mode {
            url.pop();
            return Ok(());
        }
        self.doc.delete_backward();
        self.edited()
    }

    /// Bracketed paste: the pasted text becomes its own node and is then
    /// offered to the plugins for conversion.
    pub fn paste(&mut self, text: &str) -> Result<()> {
        if let Mode::LinkPrompt { url, .. } = &mut self.mode {
            url.push_str(text.trim());
            return Ok(());
        }

        let node = self.doc.insert_text_node(text);
        let converted = self
            .registry
            .paste(&mut EditorContext::new(&mut self.doc, &mut self.surface), node)?;
        self.doc.normalize();
        self.status = if converted {
            format!("Pasted {} bytes with links converted", text.len())
        } else {
            format!("Pasted {} bytes", text.len())
        };
        self.edited()
    }

    /// Moves the caret by one character. With `extend` the end away from
    /// the selection's anchor moves instead, growing or shrinking it.
    pub fn move_caret(&mut self, forward: bool, extend: bool) -> Result<()> {
        let range = self.doc.range();
        if !extend {
            self.anchor = None;
            let caret = match (range.is_empty(), forward) {
                (true, _) => self.step(range.start, forward),
                (false, true) => range.end,
                (false, false) => range.start,
            };
            self.doc.set_range(caret..caret);
            return self.notify_selection();
        }

        let anchor = *self.anchor.get_or_insert(range.start);
        let head = if range.start < anchor {
            range.start
        } else {
            range.end
        };
        let head = self.step(head, forward);
        self.doc.set_range(anchor.min(head)..anchor.max(head));
        self.notify_selection()
    }

    fn step(&self, pos: usize, forward: bool) -> usize {
        let text = self.doc.text();
        if forward {
            text.get(pos..)
                .and_then(|t| t.chars().next())
                .map_or(pos, |c| pos + c.len_utf8())
        } else {
            text.get(..pos)
                .and_then(|t| t.chars().next_back())
                .map_or(pos, |c| pos - c.len_utf8())
        }
    }

    pub fn home(&mut self) -> Result<()> {
        self.anchor = None;
        self.doc.set_range(0..0);
        self.notify_selection()
    }

    pub fn end(&mut self) -> Result<()> {
        self.anchor = None;
        let len = self.doc.len();
        self.doc.set_range(len..len);
        self.notify_selection()
    }

    /// The toggle hotkey: removes a link under the selection, otherwise
    /// drafts one around the selection and asks for its url.
    pub fn toggle_link(&mut self) -> Result<()> {
        let outcome = self.registry.hotkey(
            LinkPlugin::NAME,
            &mut EditorContext::new(&mut self.doc, &mut self.surface),
        )?;
        let draft = match outcome {
            ToggleOutcome::Drafted(id) => Some(id),
            ToggleOutcome::Unchanged => None,
            done => {
                self.status = describe(done);
                return self.notify_selection();
            }
        };
        self.mode = Mode::LinkPrompt {
            url: String::new(),
            draft,
        };
        self.status = "Link url (Enter to confirm, Esc to cancel)".to_string();
        Ok(())
    }

    /// Confirms the url prompt. A drafted link gets the url as its href; at
    /// a bare caret the url is inserted as the text of a new link.
    pub fn confirm_link(&mut self) -> Result<()> {
        let Mode::LinkPrompt { url, draft } = std::mem::replace(&mut self.mode, Mode::Editing)
        else {
            return Ok(());
        };
        let mut ctx = EditorContext::new(&mut self.doc, &mut self.surface);
        let result = match draft {
            Some(id) => self
                .registry
                .update(LinkPlugin::NAME, &mut ctx, id, &["", url.as_str()])
                .map(|()| ToggleOutcome::Wrapped(id)),
            None => self.registry.execute(
                LinkPlugin::NAME,
                &mut ctx,
                &[self.target.as_str(), url.as_str(), url.as_str()],
            ),
        };
        self.status = match result {
            Ok(outcome) => describe(outcome),
            Err(err) => {
                log::warn!("link toggle failed: {err}");
                self.discard(draft)?;
                format!("Not linked: {err}")
            }
        };
        Ok(())
    }

    pub fn cancel_prompt(&mut self) -> Result<()> {
        if let Mode::LinkPrompt { draft, .. } = std::mem::replace(&mut self.mode, Mode::Editing) {
            self.discard(draft)?;
        }
        self.status = "Cancelled".to_string();
        Ok(())
    }

    /// Removes a drafted link that never got its url.
    fn discard(&mut self, draft: Option<NodeId>) -> Result<()> {
        if let Some(id) = draft {
            self.doc.unwrap(id)?;
        }
        Ok(())
    }

    /// The most recent editing surface signal, for the status line.
    pub fn last_signal(&self) -> Option<SurfaceSignal> {
        self.surface.last()
    }

    /// Typing and deleting collapse any keyboard selection.
    fn edited(&mut self) -> Result<()> {
        self.anchor = None;
        self.notify_selection()
    }

    fn notify_selection(&mut self) -> Result<()> {
        self.registry
            .selection_changed(&mut EditorContext::new(&mut self.doc, &mut self.surface))?;
        Ok(())
    }
}

fn describe(outcome: ToggleOutcome) -> String {
    match outcome {
        ToggleOutcome::Wrapped(id) => format!("Linked selection as {id}"),
        ToggleOutcome::Drafted(id) => format!("Drafted link {id}"),
        ToggleOutcome::Inserted(id) => format!("Inserted link {id}"),
        ToggleOutcome::Unwrapped(id) => format!("Removed link {id}"),
        ToggleOutcome::Unchanged => "Nothing to link".to_string(),
    }
}
