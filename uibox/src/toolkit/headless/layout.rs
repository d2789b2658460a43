use {
    crate::types::{Axis, PhysicalPixels, Point, PpxSuffix, Rect, Size},
    itertools::Itertools,
    std::cmp::max,
};

/// One child of a box as seen by the layout solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LayoutItem {
    pub(crate) preferred: Size,
    pub(crate) stretchy: bool,
    pub(crate) visible: bool,
}

/// Splits `total` into `count` parts that differ by at most one pixel and add up to `total`.
pub(crate) fn fair_split(count: i32, total: PhysicalPixels) -> Vec<PhysicalPixels> {
    if count == 0 {
        return Vec::new();
    }
    let per_item = (total.to_i32() as f32) / (count as f32);
    let mut prev = 0.ppx();
    let mut results = Vec::new();
    for i in 1..=count {
        let next = PhysicalPixels::from_i32((per_item * (i as f32)).round() as i32);
        results.push(next - prev);
        prev = next;
    }
    results
}

fn total_padding(visible_count: usize, padding: PhysicalPixels) -> PhysicalPixels {
    if visible_count < 2 {
        0.ppx()
    } else {
        padding * (visible_count as i32 - 1)
    }
}

/// Size a box needs to give every visible child its preferred size.
pub(crate) fn preferred_size(axis: Axis, items: &[LayoutItem], padding: PhysicalPixels) -> Size {
    let visible = items.iter().filter(|item| item.visible).collect_vec();
    let along = visible
        .iter()
        .map(|item| item.preferred.along(axis))
        .sum::<PhysicalPixels>()
        + total_padding(visible.len(), padding);
    let across = visible
        .iter()
        .map(|item| item.preferred.across(axis))
        .max()
        .unwrap_or_default();
    Size::from_axis(axis, along, across)
}

/// Computes child rects (relative to the box) for a box of the given `size`.
///
/// Non-stretchy children receive their preferred extent along the axis. Whatever space
/// is left is divided equally among stretchy children. Every child spans the full
/// box extent across the axis. Hidden children get an empty rect and no padding.
pub(crate) fn solve(
    axis: Axis,
    items: &[LayoutItem],
    size: Size,
    padding: PhysicalPixels,
) -> Vec<Rect> {
    let visible_count = items.iter().filter(|item| item.visible).count();
    let fixed: PhysicalPixels = items
        .iter()
        .filter(|item| item.visible && !item.stretchy)
        .map(|item| item.preferred.along(axis))
        .sum();
    let stretchy_count = items
        .iter()
        .filter(|item| item.visible && item.stretchy)
        .count();
    let leftover = max(
        0.ppx(),
        size.along(axis) - fixed - total_padding(visible_count, padding),
    );
    let mut shares = fair_split(stretchy_count as i32, leftover).into_iter();

    let across = size.across(axis);
    let mut pos = 0.ppx();
    let mut placed_any = false;
    let mut rects = Vec::with_capacity(items.len());
    for item in items {
        if !item.visible {
            rects.push(Rect::from_pos_size(axis_point(axis, pos), Size::default()));
            continue;
        }
        if placed_any {
            pos += padding;
        }
        let along = if item.stretchy {
            shares.next().unwrap_or_default()
        } else {
            item.preferred.along(axis)
        };
        rects.push(Rect::from_pos_size(
            axis_point(axis, pos),
            Size::from_axis(axis, along, across),
        ));
        pos += along;
        placed_any = true;
    }
    rects
}

fn axis_point(axis: Axis, along: PhysicalPixels) -> Point {
    match axis {
        Axis::Horizontal => Point::new(along, 0.ppx()),
        Axis::Vertical => Point::new(0.ppx(), along),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(x: i32, y: i32, stretchy: bool) -> LayoutItem {
        LayoutItem {
            preferred: Size::new(x.ppx(), y.ppx()),
            stretchy,
            visible: true,
        }
    }

    #[test]
    fn fair_split_adds_up() {
        let parts = fair_split(3, 100.ppx());
        assert_eq!(parts, vec![33.ppx(), 34.ppx(), 33.ppx()]);
        assert_eq!(parts.iter().sum::<PhysicalPixels>(), 100.ppx());
        assert!(fair_split(0, 100.ppx()).is_empty());
    }

    #[test]
    fn stretchy_children_share_leftover() {
        let items = [item(20, 10, false), item(5, 10, true), item(5, 10, true)];
        let rects = solve(Axis::Horizontal, &items, Size::new(120.ppx(), 30.ppx()), 0.ppx());
        assert_eq!(
            rects,
            vec![
                Rect::from_xywh(0.ppx(), 0.ppx(), 20.ppx(), 30.ppx()),
                Rect::from_xywh(20.ppx(), 0.ppx(), 50.ppx(), 30.ppx()),
                Rect::from_xywh(70.ppx(), 0.ppx(), 50.ppx(), 30.ppx()),
            ]
        );
    }

    #[test]
    fn padding_between_visible_children_only() {
        let mut hidden = item(40, 40, false);
        hidden.visible = false;
        let items = [item(10, 20, false), hidden, item(10, 30, false)];
        let rects = solve(Axis::Vertical, &items, Size::new(50.ppx(), 200.ppx()), 6.ppx());
        assert_eq!(rects[0], Rect::from_xywh(0.ppx(), 0.ppx(), 50.ppx(), 20.ppx()));
        assert!(rects[1].is_empty());
        assert_eq!(rects[2], Rect::from_xywh(0.ppx(), 26.ppx(), 50.ppx(), 30.ppx()));

        assert_eq!(
            preferred_size(Axis::Vertical, &items, 6.ppx()),
            Size::new(10.ppx(), 56.ppx())
        );
    }

    #[test]
    fn no_room_for_stretchy_children() {
        let items = [item(80, 10, false), item(5, 10, true)];
        let rects = solve(Axis::Horizontal, &items, Size::new(50.ppx(), 10.ppx()), 0.ppx());
        assert_eq!(rects[0].size_x(), 80.ppx());
        assert_eq!(rects[1].size_x(), 0.ppx());
        assert_eq!(rects[1].left(), 80.ppx());
    }
}
