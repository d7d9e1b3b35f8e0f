use std::time::Duration;

use gpui::{
    App, AppContext, Context, Entity, IntoElement, ParentElement, Render,
    StatefulInteractiveElement as _, Styled, Window, px, rgb,
};
use gpui_progress::{
    ActiveTheme, Sizable, h_flex,
    progress::{Direction, ProgressBar, ProgressCircle},
    v_flex,
};

use crate::{button, section};

pub struct ProgressStory {
    value: f32,
    indeterminate: bool,
    animated: bool,
    direction: Direction,
}

impl ProgressStory {
    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    fn new(_: &mut Window, _: &mut Context<Self>) -> Self {
        Self {
            value: 0.5,
            indeterminate: false,
            animated: true,
            direction: Direction::Clockwise,
        }
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0., 1.);
    }

    fn toggle_direction(&mut self) {
        self.direction = match self.direction {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        };
    }

    fn render_controls(&self, cx: &mut Context<Self>) -> impl IntoElement {
        h_flex()
            .gap_2()
            .flex_wrap()
            .justify_center()
            .child(button("value-0", "0%").on_click(cx.listener(|this, _, _, cx| {
                this.set_value(0.);
                cx.notify();
            })))
            .child(button("value-25", "25%").on_click(cx.listener(|this, _, _, cx| {
                this.set_value(0.25);
                cx.notify();
            })))
            .child(button("value-75", "75%").on_click(cx.listener(|this, _, _, cx| {
                this.set_value(0.75);
                cx.notify();
            })))
            .child(button("value-100", "100%").on_click(cx.listener(|this, _, _, cx| {
                this.set_value(1.);
                cx.notify();
            })))
            .child(button("value-minus", "-10%").on_click(cx.listener(|this, _, _, cx| {
                this.set_value(this.value - 0.1);
                cx.notify();
            })))
            .child(button("value-plus", "+10%").on_click(cx.listener(|this, _, _, cx| {
                this.set_value(this.value + 0.1);
                cx.notify();
            })))
            .child(
                button(
                    "toggle-indeterminate",
                    if self.indeterminate {
                        "Determinate"
                    } else {
                        "Indeterminate"
                    },
                )
                .on_click(cx.listener(|this, _, _, cx| {
                    this.indeterminate = !this.indeterminate;
                    cx.notify();
                })),
            )
            .child(
                button(
                    "toggle-animated",
                    if self.animated { "Animation off" } else { "Animation on" },
                )
                .on_click(cx.listener(|this, _, _, cx| {
                    this.animated = !this.animated;
                    cx.notify();
                })),
            )
            .child(
                button("toggle-direction", self.direction.to_string()).on_click(cx.listener(
                    |this, _, _, cx| {
                        this.toggle_direction();
                        cx.notify();
                    },
                )),
            )
    }
}

impl Render for ProgressStory {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let value = self.value;
        let indeterminate = self.indeterminate;
        let animated = self.animated;
        let track = cx.theme().progress_track;

        v_flex()
            .size_full()
            .p_4()
            .items_center()
            .gap_y_3()
            .bg(gpui::white())
            .child(self.render_controls(cx))
            .child(
                section("Progress Bar").child(
                    v_flex()
                        .w_full()
                        .gap_3()
                        .child(
                            ProgressBar::new("bar-auto")
                                .progress(value)
                                .animated(animated)
                                .indeterminate(indeterminate),
                        )
                        .child(
                            ProgressBar::new("bar-fixed")
                                .width(px(240.))
                                .large()
                                .progress(value)
                                .animated(animated)
                                .indeterminate(indeterminate)
                                .indeterminate_duration(Duration::from_millis(1500)),
                        ),
                ),
            )
            .child(
                section("Custom Style").child(
                    ProgressBar::new("bar-custom")
                        .with_size(px(16.))
                        .progress(value)
                        .color(rgb(0x2ecc71))
                        .unfilled_color(rgb(0xd5f5e3))
                        .rounded(px(8.))
                        .border_2()
                        .border_color(rgb(0x27ae60))
                        .indeterminate(indeterminate),
                ),
            )
            .child(
                section("Progress Circle")
                    .child(
                        ProgressCircle::new("circle-xsmall")
                            .xsmall()
                            .thickness(px(2.))
                            .progress(value)
                            .direction(self.direction)
                            .animated(animated)
                            .indeterminate(indeterminate),
                    )
                    .child(
                        ProgressCircle::new("circle-medium")
                            .progress(value)
                            .direction(self.direction)
                            .animated(animated)
                            .indeterminate(indeterminate),
                    )
                    .child(
                        ProgressCircle::new("circle-label")
                            .with_size(px(100.))
                            .thickness(px(8.))
                            .progress(value)
                            .direction(self.direction)
                            .animated(animated)
                            .indeterminate(indeterminate)
                            .text_sm()
                            .child(format!("{:.0}%", value * 100.)),
                    )
                    .child(
                        ProgressCircle::new("circle-filled")
                            .with_size(px(100.))
                            .thickness(px(6.))
                            .progress(value)
                            .color(rgb(0xe74c3c))
                            .unfilled_color(track)
                            .fill(rgb(0xfdedec))
                            .direction(self.direction)
                            .animated(animated)
                            .indeterminate(indeterminate)
                            .spin_duration(Duration::from_millis(600)),
                    ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story() -> ProgressStory {
        ProgressStory {
            value: 0.5,
            indeterminate: false,
            animated: true,
            direction: Direction::Clockwise,
        }
    }

    #[test]
    fn test_controls() {
        let mut story = story();
        story.set_value(story.value + 0.6);
        assert_eq!(story.value, 1.);
        story.set_value(-0.1);
        assert_eq!(story.value, 0.);

        story.toggle_direction();
        assert_eq!(story.direction, Direction::CounterClockwise);
        story.toggle_direction();
        assert_eq!(story.direction, Direction::Clockwise);
    }
}
