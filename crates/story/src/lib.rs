mod progress_story;

use gpui::{
    AnyElement, App, Bounds, Div, ElementId, Entity, InteractiveElement as _,
    IntoElement, ParentElement, Render, RenderOnce, SharedString, Stateful, Styled,
    TitlebarOptions, Window, WindowBounds, WindowOptions, div, px, size,
};
use gpui_progress::{ActiveTheme as _, Theme, ThemeConfig, h_flex, v_flex};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

pub use progress_story::ProgressStory;

/// Set up logging, the components and an optional theme file.
pub fn init(theme_path: Option<&str>, cx: &mut App) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gpui_progress=trace".parse().unwrap()),
        )
        .init();

    gpui_progress::init(cx);

    if let Some(path) = theme_path {
        match ThemeConfig::load(path) {
            Ok(config) => Theme::global_mut(cx).apply_config(&config),
            Err(err) => tracing::error!("{:?}", err),
        }
    }
}

pub fn create_new_window<F, V>(title: &str, crate_view_fn: F, cx: &mut App)
where
    V: Render + 'static,
    F: FnOnce(&mut Window, &mut App) -> Entity<V> + 'static,
{
    let mut window_size = size(px(960.), px(720.));
    if let Some(display) = cx.primary_display() {
        let display_size = display.bounds().size;
        window_size.width = window_size.width.min(display_size.width * 0.85);
        window_size.height = window_size.height.min(display_size.height * 0.85);
    }
    let window_bounds = Bounds::centered(None, window_size, cx);
    let title = SharedString::from(title.to_string());

    cx.spawn(async move |cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(window_bounds)),
            titlebar: Some(TitlebarOptions {
                title: Some(title),
                ..Default::default()
            }),
            window_min_size: Some(gpui::Size {
                width: px(480.),
                height: px(360.),
            }),
            ..Default::default()
        };

        let window = cx.open_window(options, crate_view_fn)?;
        window.update(cx, |_, window, _| window.activate_window())?;

        Ok::<_, anyhow::Error>(())
    })
    .detach();
}

/// A clickable label used by the stories.
pub(crate) fn button(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Stateful<Div> {
    div()
        .id(id)
        .px_3()
        .py_1()
        .rounded_md()
        .border_1()
        .border_color(gpui::rgb(0xbdc3c7))
        .text_sm()
        .cursor_pointer()
        .hover(|this| this.bg(gpui::rgb(0xecf0f1)))
        .child(label.into())
}

#[derive(IntoElement)]
pub(crate) struct StorySection {
    title: AnyElement,
    base: Div,
    children: Vec<AnyElement>,
}

impl ParentElement for StorySection {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for StorySection {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        v_flex()
            .gap_2()
            .w_full()
            .max_w(px(720.))
            .child(h_flex().text_lg().child(self.title))
            .child(
                v_flex()
                    .p_4()
                    .border_1()
                    .border_color(cx.theme().progress_track)
                    .rounded_lg()
                    .items_center()
                    .justify_center()
                    .child(self.base.children(self.children)),
            )
    }
}

pub(crate) fn section(title: impl IntoElement) -> StorySection {
    StorySection {
        title: title.into_any_element(),
        base: h_flex()
            .flex_wrap()
            .justify_center()
            .items_center()
            .w_full()
            .gap_4(),
        children: vec![],
    }
}
