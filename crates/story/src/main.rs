use gpui::Application;
use gpui_progress_story::{ProgressStory, create_new_window, init};

fn main() {
    let app = Application::new();

    // Parse `cargo run -- <theme.json>`
    let theme_path = std::env::args().nth(1);

    app.run(move |cx| {
        init(theme_path.as_deref(), cx);
        cx.activate(true);

        create_new_window("Progress", ProgressStory::view, cx);
    });
}
