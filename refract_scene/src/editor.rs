use super::*;

/// The object-placing buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
    Laser,
    Mirror,
    Block,
    SemiCircle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    #[default]
    Primary,
    /// Finishes a block.
    Secondary,
}

/// What the next click does.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Placement {
    /// Waiting for a tool to be selected.
    #[default]
    Idle,
    LaserOrigin,
    LaserAim { origin: Vector2<Float> },
    MirrorStart,
    MirrorEnd { start: Vector2<Float> },
    /// The outline clicked so far, without repeats.
    BlockVertices { vertices: Vec<Vector2<Float>> },
    SemiCircleCenter,
    SemiCircleOrientation { center: Vector2<Float> },
}

impl Placement {
    /// The first step of placing an object with `tool`.
    #[must_use]
    pub fn start(tool: Tool) -> Self {
        match tool {
            Tool::Laser => Self::LaserOrigin,
            Tool::Mirror => Self::MirrorStart,
            Tool::Block => Self::BlockVertices {
                vertices: Vec::new(),
            },
            Tool::SemiCircle => Self::SemiCircleCenter,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// The object currently being placed, shown (and traced) live but not yet
/// part of the scene.
#[derive(Clone, Debug, PartialEq)]
pub enum Pending {
    Emitter(Emitter),
    Mirror(Mirror),
    Block(Block),
}

impl Surface for Pending {
    fn boundaries(&self, f: &mut dyn FnMut(Boundary<'_>)) {
        match self {
            Self::Emitter(_) => {}
            Self::Mirror(mirror) => mirror.boundaries(f),
            Self::Block(block) => block.boundaries(f),
        }
    }
}

/// Heading from `from` to `to`, north if they coincide.
pub(crate) fn aim(from: &Vector2<Float>, to: &Vector2<Float>) -> Heading {
    if from == to {
        Heading::NORTH
    } else {
        Heading::towards(from, to)
    }
}

impl Scene {
    /// Switches to `tool`, abandoning the object being placed. A block that
    /// already has an outline is kept.
    pub fn select(&mut self, tool: Tool) {
        if let Placement::BlockVertices { vertices } = &self.placement {
            if vertices.len() >= 3 {
                self.commit();
            }
        }

        if self.pending.take().is_some() {
            log::debug!("dropped unfinished object");
        }

        self.placement = Placement::start(tool);
    }

    /// Updates the live preview.
    ///
    /// Nothing is changed if `pointer` isn't finite.
    pub fn pointer_moved(&mut self, pointer: impl Into<Vector2<Float>>) -> Result<(), Error> {
        let pointer = pointer.into();

        if !pointer.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("pointer position").into());
        }
        self.pointer = pointer;

        match &self.placement {
            Placement::LaserAim { origin } => {
                let heading = aim(origin, &pointer);
                self.pending = Some(Pending::Emitter(Emitter::new(
                    *origin,
                    heading,
                    Emitter::PREVIEW_DECAY,
                )?));
            }
            Placement::MirrorEnd { start } => {
                let end = if *start == pointer {
                    pointer.add_scalar(1.0)
                } else {
                    pointer
                };
                self.pending = Some(Pending::Mirror(Mirror::try_new(*start, end)?));
            }
            Placement::SemiCircleOrientation { center } => {
                let radius = (pointer - center).norm();
                let block = Block::semicircle(
                    *center,
                    radius,
                    aim(center, &pointer),
                    RefractiveIndex::CROWN_GLASS,
                )?;
                self.pending = Some(Pending::Block(block));
            }
            _ => {}
        }

        Ok(())
    }

    /// Advances the current placement. Every click also counts as a pointer move.
    pub fn click(
        &mut self,
        pointer: impl Into<Vector2<Float>>,
        button: PointerButton,
    ) -> Result<(), Error> {
        let p = pointer.into();
        self.pointer_moved(p)?;

        // build first: a rejected click leaves the placement untouched
        match &self.placement {
            Placement::Idle => {}
            Placement::LaserOrigin => {
                let preview = Emitter::new(p, Heading::NORTH, Emitter::PREVIEW_DECAY)?;
                self.pending = Some(Pending::Emitter(preview));
                self.placement = Placement::LaserAim { origin: p };
            }
            &Placement::LaserAim { origin } => {
                let heading = aim(&origin, &p);
                let laser = Emitter::new(origin, heading, Emitter::PLACED_DECAY)?;
                self.pending = Some(Pending::Emitter(laser));
                self.commit();
            }
            Placement::MirrorStart => {
                let preview = Mirror::try_new(p, p.add_scalar(1.0))?;
                self.pending = Some(Pending::Mirror(preview));
                self.placement = Placement::MirrorEnd { start: p };
            }
            Placement::MirrorEnd { .. } | Placement::SemiCircleOrientation { .. } => {
                self.commit();
            }
            Placement::BlockVertices { vertices } => {
                if button == PointerButton::Secondary && vertices.len() >= 3 {
                    self.commit();
                    return Ok(());
                }

                if !vertices.contains(&p) {
                    let mut vertices = vertices.clone();
                    vertices.push(p);
                    if vertices.len() >= 3 {
                        let block = Block::try_new(
                            vertices.iter().copied(),
                            RefractiveIndex::CROWN_GLASS,
                        )?;
                        self.pending = Some(Pending::Block(block));
                    }
                    self.placement = Placement::BlockVertices { vertices };
                }
            }
            Placement::SemiCircleCenter => {
                let preview = Block::semicircle(
                    p,
                    1.0,
                    Heading::NORTH,
                    RefractiveIndex::CROWN_GLASS,
                )?;
                self.pending = Some(Pending::Block(preview));
                self.placement = Placement::SemiCircleOrientation { center: p };
            }
        }

        Ok(())
    }

    /// Moves the pending object into the scene, and goes back to idle.
    fn commit(&mut self) {
        match self.pending.take() {
            Some(Pending::Emitter(emitter)) => self.emitters.push(emitter),
            Some(Pending::Mirror(mirror)) => self.mirrors.push(mirror),
            Some(Pending::Block(block)) => self.blocks.push(block),
            None => {}
        }
        log::debug!(
            "scene: {} emitters, {} mirrors, {} blocks",
            self.emitters.len(),
            self.mirrors.len(),
            self.blocks.len()
        );
        self.placement = Placement::Idle;
    }

    /// The instruction line shown to the user.
    #[must_use]
    pub fn prompt(&self) -> String {
        let what = match &self.placement {
            Placement::Idle => "an object".to_owned(),
            Placement::LaserOrigin => "Laser Centre".to_owned(),
            Placement::LaserAim { origin } => format!(
                "Laser Direction {:.1}°",
                aim(origin, &self.pointer).to_bearing_degrees()
            ),
            Placement::MirrorStart => "Mirror Point 1".to_owned(),
            Placement::MirrorEnd { .. } => "Mirror Point 2".to_owned(),
            Placement::BlockVertices { vertices } => match vertices.len() {
                n @ 0..=2 => format!("Block Point {}", n + 1),
                _ => "More Block Points, Right-click to stop".to_owned(),
            },
            Placement::SemiCircleCenter => "Semicircle Centre".to_owned(),
            Placement::SemiCircleOrientation { center } => format!(
                "Semicircle Orientation {:.1}°",
                aim(center, &self.pointer).to_bearing_degrees()
            ),
        };

        format!("Click to select {what}")
    }
}
