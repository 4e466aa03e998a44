//! Launch wizard screens
//!
//! Answer screens push themselves (with a snapshot of the state they were
//! entered with) before recording their answer. Screens that only wait on a
//! background action are never pushed, so stepping back skips over them.

use super::jobs::{self, LaunchFile, canonical_version};
use super::state::{Feature, LaunchState, Network};
use crate::error::Error;
use crate::tui::widgets::{
    CheckBox, Downloader, FieldStatus, LoadStatus, Loading, Selector, TextField, ValidationError,
};
use crate::tui::{Action, Context, Screen, Transition, TuiEvent, theme};
use ratatui::text::{Line, Text};
use rust_i18n::t;
use std::borrow::Cow;
use std::path::PathBuf;

type Ctx = Context<LaunchState>;
type Next = Transition<LaunchState>;

const MAX_CHAIN_ID_LEN: usize = 50;
const MAX_MONIKER_LEN: usize = 70;
const DEFAULT_MONIKER: &str = "operator";
const VERSION_INPUT: &str = "VersionInput";

/// History, then the question, then the widget
fn compose(ctx: &Ctx, prompt: Cow<'static, str>, widget: Vec<Line<'static>>) -> Text<'static> {
    let mut lines = ctx.state().responses.lines();
    if !lines.is_empty() {
        lines.push(Line::default());
    }
    lines.push(Line::styled(prompt.into_owned(), theme().prompt()));
    lines.extend(widget);
    Text::from(lines)
}

pub fn validate_chain_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(t!("err_chain_id_empty")));
    }
    if value.len() > MAX_CHAIN_ID_LEN {
        return Err(ValidationError::new(t!("err_too_long", max = MAX_CHAIN_ID_LEN)));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::new(t!("err_chain_id_chars")));
    }
    Ok(())
}

pub fn validate_moniker(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(t!("err_moniker_empty")));
    }
    if value.chars().count() > MAX_MONIKER_LEN {
        return Err(ValidationError::new(t!("err_too_long", max = MAX_MONIKER_LEN)));
    }
    if value.chars().any(char::is_control) {
        return Err(ValidationError::new(t!("err_moniker_chars")));
    }
    Ok(())
}

pub fn validate_version(value: &str) -> Result<(), ValidationError> {
    match canonical_version(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new(t!("err_version_format"))),
    }
}

/// First step: which network to join
#[derive(Debug)]
pub struct NetworkSelect {
    selector: Selector<Network>,
}

impl NetworkSelect {
    pub fn new() -> Self {
        Self {
            selector: Selector::new(Network::ALL.to_vec())
                .with_tooltips([t!("tip_testnet"), t!("tip_local")]),
        }
    }
}

impl Default for NetworkSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen<LaunchState> for NetworkSelect {
    fn update(mut self: Box<Self>, ctx: &mut Ctx, event: &TuiEvent) -> Next {
        let Some(network) = self.selector.update(event) else {
            return Transition::stay(self);
        };

        ctx.push_and_clone(self);
        let state = ctx.state_mut();
        state.network = Some(network);
        state.responses.push(t!("q_network"), network.to_string());
        Transition::goto(ChainIdInput::new())
    }

    fn view(&self, ctx: &Ctx) -> Text<'static> {
        compose(ctx, t!("q_network"), self.selector.view())
    }

    fn title(&self) -> Cow<'static, str> {
        t!("title_network")
    }

    fn tooltip(&self, _ctx: &Ctx) -> Option<String> {
        self.selector.tooltip().map(str::to_string)
    }
}

/// Chain identifier
#[derive(Debug)]
pub struct ChainIdInput {
    field: TextField,
}

impl ChainIdInput {
    pub fn new() -> Self {
        Self {
            field: TextField::new(t!("placeholder_chain_id")).with_validator(validate_chain_id),
        }
    }
}

impl Default for ChainIdInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen<LaunchState> for ChainIdInput {
    fn update(mut self: Box<Self>, ctx: &mut Ctx, event: &TuiEvent) -> Next {
        let FieldStatus::Submitted(chain_id) = self.field.update(event) else {
            return Transition::stay(self);
        };

        ctx.push_and_clone(self);
        let state = ctx.state_mut();
        state.responses.push(t!("q_chain_id"), chain_id.clone());
        state.chain_id = chain_id;
        Transition::goto(MonikerInput::new())
    }

    fn view(&self, ctx: &Ctx) -> Text<'static> {
        compose(ctx, t!("q_chain_id"), self.field.view())
    }

    fn title(&self) -> Cow<'static, str> {
        t!("title_chain")
    }

    fn hint(&self) -> Cow<'static, str> {
        t!("hint_input")
    }

    fn tooltip(&self, _ctx: &Ctx) -> Option<String> {
        Some(t!("tip_chain_id", max = MAX_CHAIN_ID_LEN).into_owned())
    }
}

/// Public node name, defaults to `operator`
#[derive(Debug)]
pub struct MonikerInput {
    field: TextField,
}

impl MonikerInput {
    pub fn new() -> Self {
        Self {
            field: TextField::new(t!("placeholder_moniker"))
                .with_default(DEFAULT_MONIKER)
                .with_validator(validate_moniker),
        }
    }
}

impl Default for MonikerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen<LaunchState> for MonikerInput {
    fn update(mut self: Box<Self>, ctx: &mut Ctx, event: &TuiEvent) -> Next {
        let FieldStatus::Submitted(moniker) = self.field.update(event) else {
            return Transition::stay(self);
        };

        ctx.push_and_clone(self);
        let state = ctx.state_mut();
        state.responses.push(t!("q_moniker"), moniker.clone());
        state.moniker = moniker;
        let preselected = state.features.clone();
        Transition::goto(FeatureSelect::new(&preselected))
    }

    fn view(&self, ctx: &Ctx) -> Text<'static> {
        compose(ctx, t!("q_moniker"), self.field.view())
    }

    fn title(&self) -> Cow<'static, str> {
        t!("title_chain")
    }

    fn hint(&self) -> Cow<'static, str> {
        t!("hint_input_default")
    }

    fn tooltip(&self, _ctx: &Ctx) -> Option<String> {
        Some(t!("tip_moniker").into_owned())
    }
}

/// Optional services; an empty choice is accepted
#[derive(Debug)]
pub struct FeatureSelect {
    boxes: CheckBox<Feature>,
}

impl FeatureSelect {
    pub fn new(preselected: &[Feature]) -> Self {
        Self {
            boxes: CheckBox::new(Feature::ALL.to_vec()).with_selected(preselected),
        }
    }
}

impl Screen<LaunchState> for FeatureSelect {
    fn update(mut self: Box<Self>, ctx: &mut Ctx, event: &TuiEvent) -> Next {
        let Some(features) = self.boxes.update(event) else {
            return Transition::stay(self);
        };

        ctx.push_and_clone(self);
        let answer = if features.is_empty() {
            t!("answer_none").into_owned()
        } else {
            features
                .iter()
                .map(Feature::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let state = ctx.state_mut();
        state.responses.push(t!("q_features"), answer);
        state.features = features;
        Transition::goto(ResolveRelease::new())
    }

    fn view(&self, ctx: &Ctx) -> Text<'static> {
        compose(ctx, t!("q_features"), self.boxes.view())
    }

    fn title(&self) -> Cow<'static, str> {
        t!("title_features")
    }

    fn hint(&self) -> Cow<'static, str> {
        t!("hint_checkbox")
    }

    fn tooltip(&self, _ctx: &Ctx) -> Option<String> {
        Some(t!("tip_features").into_owned())
    }
}

/// Spinner while the newest local release is looked up
#[derive(Debug)]
pub struct ResolveRelease {
    spinner: Loading,
}

impl ResolveRelease {
    pub fn new() -> Self {
        Self {
            spinner: Loading::new(t!("loading_releases")),
        }
    }
}

impl Default for ResolveRelease {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen<LaunchState> for ResolveRelease {
    fn init(&mut self, ctx: &mut Ctx) -> Option<Action> {
        Some(self.spinner.start(jobs::resolve_latest(ctx.config_handle())))
    }

    fn update(mut self: Box<Self>, ctx: &mut Ctx, event: &TuiEvent) -> Next {
        match self.spinner.update(event) {
            LoadStatus::Pending => Transition::stay(self),
            LoadStatus::Done(latest) => {
                ctx.state_mut().latest_version = latest.clone();
                Transition::goto(VersionInput::new(latest))
            }
            LoadStatus::Failed(err) => Transition::Fail(Error::Action(err)),
        }
    }

    fn view(&self, ctx: &Ctx) -> Text<'static> {
        compose(ctx, t!("q_release"), self.spinner.view())
    }

    fn title(&self) -> Cow<'static, str> {
        t!("title_release")
    }

    fn hint(&self) -> Cow<'static, str> {
        t!("hint_wait")
    }
}

/// Version to install, defaulting to the newest release
#[derive(Debug)]
pub struct VersionInput {
    field: TextField,
    latest: Option<String>,
}

impl VersionInput {
    pub fn new(latest: Option<String>) -> Self {
        let mut field = TextField::new(t!("placeholder_version")).with_validator(validate_version);
        if let Some(ref version) = latest {
            field = field.with_default(version.clone());
        }
        Self { field, latest }
    }

    /// Re-entry after a failed install, with the failure shown
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.field = self.field.with_error(error);
        self
    }
}

impl Screen<LaunchState> for VersionInput {
    fn update(mut self: Box<Self>, ctx: &mut Ctx, event: &TuiEvent) -> Next {
        let FieldStatus::Submitted(value) = self.field.update(event) else {
            return Transition::stay(self);
        };
        let Some(version) = canonical_version(&value) else {
            return Transition::stay(self);
        };

        ctx.push_and_clone(self);
        let state = ctx.state_mut();
        state.responses.push(t!("q_version"), version.clone());
        state
            .responses
            .note(t!("note_installing", version = version.as_str()));
        state.version = version;
        Transition::goto(DownloadBinary::new())
    }

    fn view(&self, ctx: &Ctx) -> Text<'static> {
        compose(ctx, t!("q_version"), self.field.view())
    }

    fn title(&self) -> Cow<'static, str> {
        t!("title_release")
    }

    fn hint(&self) -> Cow<'static, str> {
        t!("hint_input_default")
    }

    fn tooltip(&self, _ctx: &Ctx) -> Option<String> {
        Some(match self.latest {
            Some(ref latest) => t!("tip_version", latest = latest.as_str()).into_owned(),
            None => t!("tip_version_unknown").into_owned(),
        })
    }
}

/// Progress bar while the chosen release is installed
#[derive(Debug)]
pub struct DownloadBinary {
    downloader: Downloader,
}

impl DownloadBinary {
    pub fn new() -> Self {
        Self {
            downloader: Downloader::new(t!("loading_install")),
        }
    }
}

impl Default for DownloadBinary {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen<LaunchState> for DownloadBinary {
    fn init(&mut self, ctx: &mut Ctx) -> Option<Action> {
        let action = jobs::install(ctx.config_handle(), ctx.state().version.clone());
        Some(self.downloader.start(action))
    }

    fn update(mut self: Box<Self>, ctx: &mut Ctx, event: &TuiEvent) -> Next {
        match self.downloader.update(event) {
            LoadStatus::Pending => Transition::stay(self),
            LoadStatus::Done(path) => {
                let state = ctx.state_mut();
                state.binary_path = path.map(PathBuf::from);
                Transition::goto(SaveConfig::new())
            }
            LoadStatus::Failed(err) => {
                // Drop the version answer and the install note, then replace
                // the stale VersionInput page with a fresh one showing the error
                if ctx.peek_name() != Some(VERSION_INPUT) || ctx.pop().is_none() {
                    return Transition::Fail(Error::Setup(
                        t!("err_rollback", screen = VERSION_INPUT).into_owned(),
                    ));
                }
                let state = ctx.state_mut();
                state.responses.pop_last(2);
                state.version.clear();
                let latest = state.latest_version.clone();
                Transition::goto(VersionInput::new(latest).with_error(err.message()))
            }
        }
    }

    fn view(&self, ctx: &Ctx) -> Text<'static> {
        compose(ctx, t!("q_install"), self.downloader.view())
    }

    fn title(&self) -> Cow<'static, str> {
        t!("title_install")
    }

    fn hint(&self) -> Cow<'static, str> {
        t!("hint_wait")
    }

    fn can_go_back(&self) -> bool {
        false
    }
}

/// Spinner while the launch file is written
#[derive(Debug)]
pub struct SaveConfig {
    spinner: Loading,
}

impl SaveConfig {
    pub fn new() -> Self {
        Self {
            spinner: Loading::new(t!("loading_save")),
        }
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen<LaunchState> for SaveConfig {
    fn init(&mut self, ctx: &mut Ctx) -> Option<Action> {
        let file = LaunchFile::from_state(ctx.state())?;
        Some(self.spinner.start(jobs::save_launch_file(ctx.config_handle(), file)))
    }

    fn update(mut self: Box<Self>, ctx: &mut Ctx, event: &TuiEvent) -> Next {
        if !self.spinner.is_running() {
            return Transition::Fail(Error::Setup(t!("err_incomplete_state").into_owned()));
        }
        match self.spinner.update(event) {
            LoadStatus::Pending => Transition::stay(self),
            LoadStatus::Done(path) => {
                let state = ctx.state_mut();
                state.launch_file = path.map(PathBuf::from);
                if let Some(ref path) = state.launch_file {
                    state
                        .responses
                        .note(t!("note_saved", path = path.display()));
                }
                Transition::goto(Done)
            }
            LoadStatus::Failed(err) => Transition::Fail(Error::Action(err)),
        }
    }

    fn view(&self, ctx: &Ctx) -> Text<'static> {
        compose(ctx, t!("q_save"), self.spinner.view())
    }

    fn title(&self) -> Cow<'static, str> {
        t!("title_save")
    }

    fn hint(&self) -> Cow<'static, str> {
        t!("hint_wait")
    }

    fn can_go_back(&self) -> bool {
        false
    }
}

/// Final screen; Enter leaves the wizard
#[derive(Debug)]
pub struct Done;

impl Screen<LaunchState> for Done {
    fn update(self: Box<Self>, _ctx: &mut Ctx, event: &TuiEvent) -> Next {
        match event {
            TuiEvent::Enter | TuiEvent::Escape | TuiEvent::Char('q') => Transition::Quit,
            _ => Transition::stay(self),
        }
    }

    fn view(&self, ctx: &Ctx) -> Text<'static> {
        let mut lines = ctx.state().responses.lines();
        lines.push(Line::default());
        lines.push(Line::styled(t!("done_message").into_owned(), theme().success()));
        Text::from(lines)
    }

    fn title(&self) -> Cow<'static, str> {
        t!("title_done")
    }

    fn hint(&self) -> Cow<'static, str> {
        t!("hint_done")
    }

    fn can_go_back(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_rules() {
        assert!(validate_chain_id("x").is_ok());
        assert!(validate_chain_id("local-1").is_ok());
        assert!(validate_chain_id("").is_err());
        assert!(validate_chain_id("Upper").is_err());
        assert!(validate_chain_id("has space").is_err());
        assert!(validate_chain_id(&"a".repeat(MAX_CHAIN_ID_LEN + 1)).is_err());
    }

    #[test]
    fn test_moniker_rules() {
        assert!(validate_moniker("operator").is_ok());
        assert!(validate_moniker("节点 一号").is_ok());
        assert!(validate_moniker("   ").is_err());
        assert!(validate_moniker("tab\there").is_err());
    }

    #[test]
    fn test_version_rules() {
        assert!(validate_version("v1.2.3").is_ok());
        assert!(validate_version("1.2.3").is_ok());
        assert!(validate_version("v1").is_err());
    }
}
