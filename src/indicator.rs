use crate::navigation::SectionId;

/// Horizontal extent of a measured element, in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub width: f64,
}

/// Navigation geometry measured after a render.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavLayout {
    pub container: Option<Rect>,
    pub buttons: [Option<Rect>; 5],
}

impl NavLayout {
    pub fn button(&self, id: SectionId) -> Option<Rect> {
        self.buttons[id.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorStyle {
    pub offset: f64,
    pub width: f64,
    pub visible: bool,
}

impl IndicatorStyle {
    pub const HIDDEN: Self = Self {
        offset: 0.0,
        width: 0.0,
        visible: false,
    };

    pub fn to_css(&self) -> String {
        let opacity = if self.visible { 1 } else { 0 };
        format!(
            "width: {:.2}px; transform: translateX({:.2}px); opacity: {opacity};",
            self.width, self.offset
        )
    }
}

/// Places the highlight under the button for `active`. A missing container or
/// button, or a zero-width button (navigation collapsed), hides it.
pub fn project(active: SectionId, layout: &NavLayout) -> IndicatorStyle {
    let (Some(container), Some(button)) = (layout.container, layout.button(active)) else {
        return IndicatorStyle::HIDDEN;
    };

    if button.width <= 0.0 {
        return IndicatorStyle::HIDDEN;
    }

    IndicatorStyle {
        offset: button.left - container.left,
        width: button.width,
        visible: true,
    }
}
