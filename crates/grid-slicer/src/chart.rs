//! Layout of the slice chart: the polyline and axis labels to draw.

use serde::Serialize;
use weather_common::Point;

/// Number of y-axis intervals.
const Y_DIVISIONS: usize = 4;

/// A text label at a position along one axis (chart units).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub position: f32,
    pub text: String,
}

/// Size of the chart area in chart units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: f32,
    pub height: f32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 200.0,
        }
    }
}

impl ChartLayout {
    /// Vertices of the slice line.
    ///
    /// Sample `i` of `N` sits at `x = i / N * width`. Values are scaled so
    /// that `attr_max` reaches the top of the chart. When `previous` is
    /// given (daily attributes) its scaled value is subtracted, missing
    /// entries counting as zero.
    pub fn polyline(&self, values: &[f32], previous: Option<&[f32]>, attr_max: f32) -> Vec<[f32; 2]> {
        let n = values.len();
        let scale = if attr_max > 0.0 {
            self.height / attr_max
        } else {
            0.0
        };

        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = i as f32 / n as f32 * self.width;
                let before = previous
                    .and_then(|p| p.get(i))
                    .map_or(0.0, |&p| scale * p);
                [x, scale * v - before]
            })
            .collect()
    }

    /// Y-axis labels at 0, ¼, ½, ¾ and the full height.
    ///
    /// The ends read `MIN` and `MAX`; the rest show `span * fraction`
    /// truncated to an integer.
    pub fn y_labels(&self, span: f32) -> Vec<AxisLabel> {
        (0..=Y_DIVISIONS)
            .map(|i| {
                let fraction = i as f32 / Y_DIVISIONS as f32;
                let text = match i {
                    0 => "MIN".to_string(),
                    Y_DIVISIONS => "MAX".to_string(),
                    _ => format!("{}", (span * fraction) as i32),
                };
                AxisLabel {
                    position: fraction * self.height,
                    text,
                }
            })
            .collect()
    }

    /// X-axis labels, one `"(x.x,y.y)"` per tick, spread evenly over the width.
    pub fn x_labels(&self, ticks: &[Point]) -> Vec<AxisLabel> {
        let divisions = ticks.len().saturating_sub(1).max(1) as f32;
        ticks
            .iter()
            .enumerate()
            .map(|(i, tick)| AxisLabel {
                position: i as f32 / divisions * self.width,
                text: tick.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_scaling() {
        let chart = ChartLayout::default();
        let line = chart.polyline(&[0.0, 5.0, 10.0, 2.5], None, 10.0);

        assert_eq!(line.len(), 4);
        assert_eq!(line[0], [0.0, 0.0]);
        assert_eq!(line[1], [250.0, 100.0]);
        assert_eq!(line[2], [500.0, 200.0]);
        assert_eq!(line[3], [750.0, 50.0]);
    }

    #[test]
    fn test_polyline_daily_subtracts_previous() {
        let chart = ChartLayout::default();
        let line = chart.polyline(&[4.0, 6.0], Some(&[1.0, 6.0]), 20.0);
        assert_eq!(line[0][1], 30.0);
        assert_eq!(line[1][1], 0.0);
    }

    #[test]
    fn test_polyline_zero_max() {
        let chart = ChartLayout::default();
        let line = chart.polyline(&[1.0, 2.0], None, 0.0);
        assert!(line.iter().all(|v| v[1] == 0.0));
    }

    #[test]
    fn test_y_labels() {
        let labels = ChartLayout::default().y_labels(130.0);
        let text: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(text, vec!["MIN", "32", "65", "97", "MAX"]);
        assert_eq!(labels[2].position, 100.0);
    }

    #[test]
    fn test_x_labels() {
        let ticks = [Point::new(0.5, 0.5), Point::new(1.5, 1.5), Point::new(2.5, 2.5)];
        let labels = ChartLayout::default().x_labels(&ticks);
        assert_eq!(labels[0].text, "(0.5,0.5)");
        assert_eq!(labels[1].position, 500.0);
        assert_eq!(labels[2].position, 1000.0);
    }
}
