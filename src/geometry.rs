// Vector alias and drawing-surface bounds shared by both effects

pub type Vec2 = glm::TVec2<f64>;

pub fn vec2(x: f64, y: f64) -> Vec2 {
    glm::vec2(x, y)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Bounds {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    // Toroidal wrap: leaving one edge re-enters at the opposite edge
    pub fn wrap(&self, pos: &mut Vec2) {
        if pos.x < 0.0 {
            pos.x = self.width;
        } else if pos.x > self.width {
            pos.x = 0.0;
        }
        if pos.y < 0.0 {
            pos.y = self.height;
        } else if pos.y > self.height {
            pos.y = 0.0;
        }
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_every_edge() {
        let b = Bounds::new(800.0, 600.0);
        let mut p = vec2(800.5, 10.0);
        b.wrap(&mut p);
        assert_eq!(p, vec2(0.0, 10.0));

        let mut p = vec2(-0.1, 10.0);
        b.wrap(&mut p);
        assert_eq!(p, vec2(800.0, 10.0));

        let mut p = vec2(10.0, 600.1);
        b.wrap(&mut p);
        assert_eq!(p, vec2(10.0, 0.0));

        let mut p = vec2(10.0, -3.0);
        b.wrap(&mut p);
        assert_eq!(p, vec2(10.0, 600.0));
    }

    #[test]
    fn inside_points_are_untouched() {
        let b = Bounds::new(800.0, 600.0);
        let mut p = vec2(400.0, 300.0);
        b.wrap(&mut p);
        assert_eq!(p, vec2(400.0, 300.0));
        assert!(b.contains(&p));
    }
}
