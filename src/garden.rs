use crate::error::{GardenError, RuleViolation};
use crate::robot::{Direction, Robot, Slot};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Label of an area, one character wide (`'A'..='Z'` on the grid).
pub type Label = char;

/// A labeled cell with its current content, as returned by [`Garden::areas`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub label: Label,
    pub position: IVec2,
    pub slot: Slot,
}

/// The complete simulation state: grid, areas and robot.
///
/// Every garden goes through [`Garden::new`], which guarantees that
/// - every declared label sits on exactly one cell and every placed label is declared,
/// - no two labels share a cell,
/// - the robot and all areas lie inside the grid.
///
/// The mutating operations below keep those invariants: labels never move,
/// only the content of their slots does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Garden {
    /// Width (`x`) and height (`y`) of the grid.
    size: IVec2,

    robot: Robot,

    /// Area Registry: label -> content.
    areas: HashMap<Label, Slot>,

    /// Object Locations: cell -> label.
    locations: HashMap<IVec2, Label>,
}

impl Garden {
    /// Builds a garden with an empty-handed robot at `robot`.
    ///
    /// `areas` maps each label to its content and `locations` maps cells to
    /// labels. A cell can hold only one label by construction; the remaining
    /// invariants are checked here.
    pub fn new(
        size: IVec2,
        robot: IVec2,
        areas: HashMap<Label, Slot>,
        locations: HashMap<IVec2, Label>,
    ) -> Result<Self, GardenError> {
        let garden = Self {
            size,
            robot: Robot::new(robot),
            areas,
            locations,
        };
        if !garden.contains(robot) {
            return Err(GardenError::RobotOutOfBounds(robot));
        }

        let mut placed: Vec<(Label, IVec2)> = garden
            .locations
            .iter()
            .map(|(&pos, &label)| (label, pos))
            .collect();
        placed.sort_unstable_by_key(|&(label, pos)| (label, pos.y, pos.x));
        if let Some(&(label, _)) = placed.iter().find(|&&(_, pos)| !garden.contains(pos)) {
            return Err(GardenError::AreaOutOfBounds(label));
        }
        if let Some(pair) = placed.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(GardenError::DuplicateArea(pair[0].0));
        }
        if let Some(&(label, _)) = placed.iter().find(|(l, _)| !garden.areas.contains_key(l)) {
            return Err(GardenError::UndeclaredArea(label));
        }
        if let Some(label) = garden
            .labels()
            .into_iter()
            .find(|l| placed.binary_search_by_key(l, |&(p, _)| p).is_err())
        {
            return Err(GardenError::UnplacedArea(label));
        }
        Ok(garden)
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.x as u32
    }

    pub fn height(&self) -> u32 {
        self.size.y as u32
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    /// Returns true if `pos` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.cmpge(IVec2::ZERO).all() && pos.cmplt(self.size).all()
    }

    /// Label of the area on `pos`, or `None` for grass.
    pub fn area_at(&self, pos: IVec2) -> Option<Label> {
        self.locations.get(&pos).copied()
    }

    /// Content of the area `label`, or `None` if there is no such area.
    pub fn slot(&self, label: Label) -> Option<Slot> {
        self.areas.get(&label).copied()
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// All labels in ascending order.
    pub fn labels(&self) -> Vec<Label> {
        let mut labels: Vec<Label> = self.areas.keys().copied().collect();
        labels.sort_unstable();
        labels
    }

    /// All areas in ascending label order.
    pub fn areas(&self) -> Vec<Area> {
        let mut areas: Vec<Area> = self
            .locations
            .iter()
            .map(|(&position, &label)| Area {
                label,
                position,
                slot: self.areas[&label],
            })
            .collect();
        areas.sort_unstable_by_key(|a| a.label);
        areas
    }

    /// Steps the robot one cell in `direction`.
    ///
    /// The robot stays where it is if the step would leave the grid.
    pub fn move_robot(&mut self, direction: Direction) -> Result<(), RuleViolation> {
        let target = self.robot.position + direction.offset();
        if !self.contains(target) {
            return Err(RuleViolation::OutOfMap);
        }
        self.robot.position = target;
        Ok(())
    }

    /// Moves the content of the area under the robot into its gripper.
    pub fn pick_up(&mut self) -> Result<(), RuleViolation> {
        if self.robot.is_carrying() {
            return Err(RuleViolation::AlreadyCarrying);
        }
        let position = self.robot.position;
        let slot = self
            .area_slot_mut(position)
            .ok_or(RuleViolation::PickUpFromGrass)?;
        if slot.is_empty() {
            return Err(RuleViolation::PickUpFromEmpty);
        }
        let mass = slot.take();
        self.robot.carrying = mass;
        Ok(())
    }

    /// Drops the carried mass into the empty area under the robot.
    pub fn put_down(&mut self) -> Result<(), RuleViolation> {
        if !self.robot.is_carrying() {
            return Err(RuleViolation::NotCarrying);
        }
        let position = self.robot.position;
        let carried = self.robot.carrying;
        let slot = self
            .area_slot_mut(position)
            .ok_or(RuleViolation::PutOnGrass)?;
        if !slot.is_empty() {
            return Err(RuleViolation::PutOnOccupied);
        }
        *slot = carried;
        self.robot.carrying = Slot::Empty;
        Ok(())
    }

    fn area_slot_mut(&mut self, pos: IVec2) -> Option<&mut Slot> {
        let label = self.locations.get(&pos)?;
        self.areas.get_mut(label)
    }

    /// Returns true when the robot carries nothing and the populated areas,
    /// walked in ascending label order, never decrease in mass.
    ///
    /// Empty areas are skipped: they neither break the order nor reset the
    /// running minimum, so `A=10, B=empty, C=5` is unsorted while
    /// `A=empty, B=5, C=empty, D=5` is sorted.
    pub fn is_sorted(&self) -> bool {
        if self.robot.is_carrying() {
            return false;
        }
        let mut previous: Option<u32> = None;
        for label in self.labels() {
            let Some(mass) = self.areas[&label].mass() else {
                continue;
            };
            if previous.is_some_and(|p| p > mass) {
                return false;
            }
            previous = Some(mass);
        }
        true
    }
}

/// Renders the area list, the grid and the robot's load.
impl fmt::Display for Garden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in self.labels() {
            writeln!(f, "{label}: {}", self.areas[&label])?;
        }
        writeln!(f)?;
        for y in 0..self.size.y {
            for x in 0..self.size.x {
                let pos = IVec2::new(x, y);
                let cell = if pos == self.robot.position {
                    '$'
                } else {
                    self.area_at(pos).unwrap_or('.')
                };
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        match self.robot.carrying {
            Slot::Empty => write!(f, "\nRobot: nothing"),
            Slot::Mass(m) => write!(f, "\nRobot: {m}"),
        }
    }
}
