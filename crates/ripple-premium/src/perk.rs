//! Perk rows of the upsell screen.

use ripple_components::{Font, Label, RoundedRect};
use ripple_flow::{AnyComponent, Component, ComponentHost, Environment, Transition};
use ripple_graphics::{Color, GradientDirection};
use ripple_layout::{Point, Rect, Size};

/// Subscription perks in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Perk {
    Limits,
    Upload,
    Speed,
    Voice,
    NoAds,
    Reactions,
    Stickers,
    Chat,
    Badge,
    Avatar,
}

impl Perk {
    pub const ALL: [Perk; 10] = [
        Perk::Limits,
        Perk::Upload,
        Perk::Speed,
        Perk::Voice,
        Perk::NoAds,
        Perk::Reactions,
        Perk::Stickers,
        Perk::Chat,
        Perk::Badge,
        Perk::Avatar,
    ];

    /// Stable row identity.
    pub fn identifier(self) -> &'static str {
        match self {
            Perk::Limits => "limits",
            Perk::Upload => "upload",
            Perk::Speed => "speed",
            Perk::Voice => "voice",
            Perk::NoAds => "noAds",
            Perk::Reactions => "reactions",
            Perk::Stickers => "stickers",
            Perk::Chat => "chat",
            Perk::Badge => "badge",
            Perk::Avatar => "avatar",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Perk::Limits => "Doubled Limits",
            Perk::Upload => "Upload Larger Files",
            Perk::Speed => "Faster Download Speed",
            Perk::Voice => "Voice-to-Text Conversion",
            Perk::NoAds => "No Ads",
            Perk::Reactions => "Unique Reactions",
            Perk::Stickers => "Premium Stickers",
            Perk::Chat => "Advanced Chat Management",
            Perk::Badge => "Profile Badge",
            Perk::Avatar => "Animated Profile Pictures",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Perk::Limits => "Up to 1000 channels, 20 folders, 10 pins and more",
            Perk::Upload => "Send media and files each up to 4 GB",
            Perk::Speed => "Download media and files at the fastest possible speed",
            Perk::Voice => "Read the transcription of any incoming voice message",
            Perk::NoAds => "No more ads in public channels",
            Perk::Reactions => "An infinitely expanding set of exclusive reactions",
            Perk::Stickers => "Exclusive stickers with full-screen effects",
            Perk::Chat => "Default folders, auto-archiving and more tools",
            Perk::Badge => "A star badge appears next to your name",
            Perk::Avatar => "Bring your profile picture to life",
        }
    }

    /// Icon gradient, top to bottom.
    pub fn gradient(self) -> [Color; 2] {
        match self {
            Perk::Limits => [Color::rgb(0x5ba0ff), Color::rgb(0x798aff)],
            Perk::Upload => [Color::rgb(0x798aff), Color::rgb(0x9377ff)],
            Perk::Speed => [Color::rgb(0x9377ff), Color::rgb(0xac64f3)],
            Perk::Voice => [Color::rgb(0xac64f3), Color::rgb(0xc456ae)],
            Perk::NoAds => [Color::rgb(0xc456ae), Color::rgb(0xcf579a)],
            Perk::Reactions => [Color::rgb(0xcf579a), Color::rgb(0xdb5887)],
            Perk::Stickers => [Color::rgb(0xdb5887), Color::rgb(0xdb496f)],
            Perk::Chat => [Color::rgb(0xdb496f), Color::rgb(0xe95d44)],
            Perk::Badge => [Color::rgb(0xe95d44), Color::rgb(0xf2822a)],
            Perk::Avatar => [Color::rgb(0xf2822a), Color::rgb(0xfba32a)],
        }
    }
}

const ICON_SIZE: f32 = 30.0;
const ICON_SPACING: f32 = 16.0;
const ICON_CORNER_RADIUS: f32 = 7.0;
const TEXT_TOP_INSET: f32 = 9.0;
const TEXT_SPACING: f32 = 3.0;
const TEXT_BOTTOM_INSET: f32 = 9.0;
const TITLE_FONT: Font = Font::semibold(17.0);
const SUBTITLE_FONT: Font = Font::regular(13.0);

/// One row of the perk list: gradient icon, title, wrapping subtitle.
#[derive(Clone, Debug, PartialEq)]
pub struct PerkRow {
    pub perk: Perk,
    pub title_color: Color,
    pub subtitle_color: Color,
}

pub struct PerkRowView {
    icon: ComponentHost,
    title: ComponentHost,
    subtitle: ComponentHost,
}

impl PerkRowView {
    pub fn icon(&self) -> &ComponentHost {
        &self.icon
    }

    pub fn title(&self) -> &ComponentHost {
        &self.title
    }

    pub fn subtitle(&self) -> &ComponentHost {
        &self.subtitle
    }
}

impl Component for PerkRow {
    type View = PerkRowView;

    fn make_view(&self) -> PerkRowView {
        PerkRowView {
            icon: ComponentHost::new(),
            title: ComponentHost::new(),
            subtitle: ComponentHost::new(),
        }
    }

    fn update(
        &self,
        view: &mut PerkRowView,
        available: Size,
        env: &Environment,
        transition: Transition,
    ) -> Size {
        let text_left = ICON_SIZE + ICON_SPACING;
        let text_width = available.width - text_left;

        let title_size = view.title.update(
            transition,
            &AnyComponent::new(Label::new(self.perk.title(), TITLE_FONT, self.title_color)),
            env,
            Size::new(text_width, available.height),
        );
        let subtitle_size = view.subtitle.update(
            transition,
            &AnyComponent::new(Label::multiline(
                self.perk.subtitle(),
                SUBTITLE_FONT,
                self.subtitle_color,
            )),
            env,
            Size::new(text_width, f32::INFINITY),
        );

        let height =
            TEXT_TOP_INSET + title_size.height + TEXT_SPACING + subtitle_size.height
                + TEXT_BOTTOM_INSET;

        let [top, bottom] = self.perk.gradient();
        view.icon.update(
            transition,
            &AnyComponent::new(RoundedRect::gradient(
                vec![top, bottom],
                ICON_CORNER_RADIUS,
                GradientDirection::Vertical,
            )),
            env,
            Size::new(ICON_SIZE, ICON_SIZE),
        );
        view.icon.set_frame(
            Rect::new(0.0, (height - ICON_SIZE) / 2.0, ICON_SIZE, ICON_SIZE),
            transition,
        );
        view.title.set_frame(
            Rect {
                origin: Point::new(text_left, TEXT_TOP_INSET),
                size: title_size,
            },
            transition,
        );
        view.subtitle.set_frame(
            Rect {
                origin: Point::new(text_left, TEXT_TOP_INSET + title_size.height + TEXT_SPACING),
                size: subtitle_size,
            },
            transition,
        );

        Size::new(available.width, height)
    }
}
