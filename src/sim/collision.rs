//! Collision detection and response
//!
//! Ball against the surface edges and against the racquet. The racquet test
//! is an inclusive overlap of the ball's bounding box with the racquet
//! rectangle, which is all the original game ever needed.

use super::state::{Ball, Paddle, Surface};
use crate::tuning::Tuning;

/// Reflect off the left or right edge, losing `restitution` of the speed.
/// Returns whether the ball touched a side wall.
pub fn reflect_side_walls(ball: &mut Ball, surface: Surface, restitution: f32) -> bool {
    if ball.left() < 0.0 {
        ball.pos.x = ball.radius;
    } else if ball.right() > surface.width {
        ball.pos.x = surface.width - ball.radius;
    } else {
        return false;
    }
    ball.vel.x *= -restitution;
    true
}

/// Reflect off the top edge using the ball's own bounce coefficient
pub fn reflect_top(ball: &mut Ball) -> bool {
    if ball.top() >= 0.0 {
        return false;
    }
    ball.pos.y = ball.radius;
    ball.vel.y *= -ball.bounce;
    true
}

/// Ball has dropped past the bottom edge
pub fn fell_through(ball: &Ball, surface: Surface) -> bool {
    ball.bottom() > surface.height
}

/// Bounding-box overlap between ball and racquet (edges touching count)
pub fn ball_paddle_overlap(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bottom() >= paddle.top()
        && ball.top() <= paddle.bottom()
        && ball.right() >= paddle.left()
        && ball.left() <= paddle.right()
}

/// Where the ball struck the racquet: 0 at center, -1/+1 at the left/right
/// edge. Hits on the ball's overhang land slightly beyond +-1.
pub fn hit_position(ball: &Ball, paddle: &Paddle) -> f32 {
    (ball.pos.x - paddle.pos.x) / paddle.half_width()
}

/// Place the ball on top of the racquet and send it back up with english
/// proportional to the hit position.
pub fn deflect(ball: &mut Ball, paddle: &Paddle, tuning: &Tuning) {
    ball.pos.y = paddle.top() - ball.radius;
    ball.vel.y = tuning.deflect_vy;
    ball.vel.x = hit_position(ball, paddle) * tuning.english;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup() -> (Ball, Paddle, Surface, Tuning) {
        let tuning = Tuning::default();
        let surface = Surface::new(400.0, 600.0);
        (
            Ball::home(surface, &tuning),
            Paddle::home(surface, &tuning),
            surface,
            tuning,
        )
    }

    #[test]
    fn test_left_wall_reflection() {
        let (mut ball, _, surface, tuning) = setup();
        ball.pos = Vec2::new(5.0, 300.0);
        ball.vel = Vec2::new(-10.0, 0.0);

        assert!(reflect_side_walls(&mut ball, surface, tuning.wall_restitution));
        assert_eq!(ball.pos.x, ball.radius);
        assert!(ball.vel.x > 0.0);
        assert!((ball.vel.x - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_right_wall_reflection() {
        let (mut ball, _, surface, tuning) = setup();
        ball.pos = Vec2::new(395.0, 300.0);
        ball.vel = Vec2::new(6.0, 0.0);

        assert!(reflect_side_walls(&mut ball, surface, tuning.wall_restitution));
        assert_eq!(ball.pos.x, 380.0);
        assert!((ball.vel.x + 4.8).abs() < 1e-5);
    }

    #[test]
    fn test_top_reflection() {
        let (mut ball, _, _, _) = setup();
        ball.pos = Vec2::new(200.0, 10.0);
        ball.vel = Vec2::new(0.0, -10.0);

        assert!(reflect_top(&mut ball));
        assert_eq!(ball.pos.y, 20.0);
        assert!((ball.vel.y - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_no_reflection_inside() {
        let (mut ball, _, surface, tuning) = setup();
        let before = ball;
        assert!(!reflect_side_walls(&mut ball, surface, tuning.wall_restitution));
        assert!(!reflect_top(&mut ball));
        assert_eq!(ball, before);
    }

    #[test]
    fn test_fell_through() {
        let (mut ball, _, surface, _) = setup();
        ball.pos.y = 580.0;
        assert!(!fell_through(&ball, surface));
        ball.pos.y = 580.5;
        assert!(fell_through(&ball, surface));
    }

    #[test]
    fn test_overlap_edges_are_inclusive() {
        let (mut ball, paddle, _, _) = setup();
        // Ball bottom exactly on racquet top
        ball.pos = Vec2::new(paddle.pos.x, paddle.top() - ball.radius);
        assert!(ball_paddle_overlap(&ball, &paddle));

        ball.pos.y -= 0.01;
        assert!(!ball_paddle_overlap(&ball, &paddle));

        // Ball right edge exactly on racquet left edge
        ball.pos = Vec2::new(paddle.left() - ball.radius, paddle.top());
        assert!(ball_paddle_overlap(&ball, &paddle));
        ball.pos.x -= 0.01;
        assert!(!ball_paddle_overlap(&ball, &paddle));
    }

    #[test]
    fn test_deflect_center_is_straight_up() {
        let (mut ball, paddle, _, tuning) = setup();
        ball.pos = Vec2::new(paddle.pos.x, paddle.top());
        ball.vel = Vec2::new(3.0, 9.0);

        deflect(&mut ball, &paddle, &tuning);
        assert_eq!(ball.vel.x, 0.0);
        assert_eq!(ball.vel.y, -15.0);
        assert_eq!(ball.pos.y, paddle.top() - ball.radius);
    }

    #[test]
    fn test_deflect_edges_push_outward() {
        let (mut ball, paddle, _, tuning) = setup();

        ball.pos = Vec2::new(paddle.left(), paddle.top());
        deflect(&mut ball, &paddle, &tuning);
        assert!(ball.vel.x < 0.0);
        assert!((ball.vel.x + tuning.english).abs() < 1e-5);

        ball.pos = Vec2::new(paddle.right(), paddle.top());
        deflect(&mut ball, &paddle, &tuning);
        assert!(ball.vel.x > 0.0);
        assert!((ball.vel.x - tuning.english).abs() < 1e-5);
    }

    #[test]
    fn test_hit_position_is_linear() {
        let (mut ball, paddle, _, _) = setup();
        ball.pos.x = paddle.pos.x + paddle.half_width() / 2.0;
        assert!((hit_position(&ball, &paddle) - 0.5).abs() < 1e-6);
    }
}
