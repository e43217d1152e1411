use nalgebra::Vector2;

pub const SEPARATION_RADIUS: f32 = 35.0;
const SEPARATION_FORCE: f32 = 0.2;

pub enum SteeringBehavior<'n> {
    Arrive {
        target: Vector2<f32>,
        speed: f32,
    },
    Separation {
        neighbours: &'n [Vector2<f32>],
        // Push direction used when two players stand on the same spot
        fallback: Vector2<f32>,
    },
}

impl SteeringBehavior<'_> {
    pub fn calculate(&self, position: Vector2<f32>, delta_time: f32) -> SteeringOutput {
        match self {
            SteeringBehavior::Arrive { target, speed } => {
                let to_target = *target - position;
                let distance = to_target.norm();

                if distance <= f32::EPSILON {
                    return SteeringOutput::zero();
                }

                // Never overshoot the target
                let step = (speed * delta_time).min(distance);

                SteeringOutput::new(to_target / distance * step)
            }
            SteeringBehavior::Separation {
                neighbours,
                fallback,
            } => {
                let displacement = neighbours
                    .iter()
                    .filter_map(|other| {
                        let away = position - other;
                        let distance = away.norm();

                        if distance >= SEPARATION_RADIUS {
                            return None;
                        }

                        let direction = if distance > f32::EPSILON {
                            away / distance
                        } else {
                            *fallback
                        };

                        let overlap = SEPARATION_RADIUS - distance;

                        Some(direction * overlap * SEPARATION_FORCE * delta_time)
                    })
                    .fold(Vector2::zeros(), |acc, push| acc + push);

                SteeringOutput::new(displacement)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SteeringOutput {
    pub displacement: Vector2<f32>,
}

impl SteeringOutput {
    pub fn new(displacement: Vector2<f32>) -> Self {
        SteeringOutput { displacement }
    }

    pub fn zero() -> Self {
        SteeringOutput {
            displacement: Vector2::zeros(),
        }
    }
}
