//! Framing and line parsing for LAMMPS-style text dumps.
//!
//! A frame looks like this:
//!
//! ```text
//! ITEM: TIMESTEP
//! 1000
//! ITEM: NUMBER OF ATOMS
//! 3
//! ITEM: BOX BOUNDS pp pp pp
//! 0.0 10.0
//! 0.0 10.0
//! 0.0 10.0
//! ITEM: ATOMS id type xs ys zs ix iy iz
//! 1 1 0.1 0.1 0.1 0 0 0
//! 2 1 0.2 0.1 0.1 0 0 0
//! 3 2 0.5 0.1 0.1 0 0 -1
//! ```
//!
//! Only the structure is relied upon: 9 header lines, of which lines 6 to 8 hold the box bounds,
//! followed by a fixed number of atom lines. The `ITEM:` labels themselves are never checked.
use glam::{DVec3, IVec3};

/// Number of header lines that precede the atoms of every frame.
pub const NHEADER: usize = 9;

/// The 1-based header line holding the timestep.
const TIMESTEP_LINE: usize = 2;
/// The 1-based header line holding the number of atoms.
const NATOMS_LINE: usize = 4;
/// The 1-based header lines holding the `lo hi` bounds for x, y, and z.
const BOUNDS_LINES: [usize; 3] = [6, 7, 8];

/// The state of the framing machine, between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// The number of header lines of the current frame consumed so far.
    ///
    /// `ReadingHeader(0)` is the state in between frames, including the very start of a stream.
    ReadingHeader(usize),
    /// The number of atom lines of the current frame consumed so far.
    ReadingAtoms(usize),
    /// The last atom line of a frame was just consumed.
    FrameComplete,
}

/// What a line means, according to its position in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Timestep,
    AtomCount,
    /// Box bounds along an axis (0 for x, 1 for y, 2 for z).
    Bounds(usize),
    /// Any other header line, such as the `ITEM:` labels.
    Label,
    /// The atom line with this 0-based index within the frame.
    Atom(usize),
}

/// Splits a stream of lines into frames by counting, without looking at their contents.
#[derive(Debug, Clone)]
pub struct Framer {
    natoms: usize,
    state: FrameState,
}

impl Framer {
    pub fn new(natoms: usize) -> Self {
        Self {
            natoms,
            state: FrameState::ReadingHeader(0),
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Whether the framer is somewhere inside a frame.
    ///
    /// Running out of lines while this is `true` means the last frame was cut short.
    pub fn is_mid_frame(&self) -> bool {
        !matches!(
            self.state,
            FrameState::ReadingHeader(0) | FrameState::FrameComplete
        )
    }

    /// Account for the next line and return its role.
    pub fn advance(&mut self) -> LineRole {
        let (role, next) = match self.state {
            FrameState::FrameComplete => (Self::header_role(1), FrameState::ReadingHeader(1)),
            FrameState::ReadingHeader(n) if n < NHEADER => {
                (Self::header_role(n + 1), FrameState::ReadingHeader(n + 1))
            }
            FrameState::ReadingHeader(_) => (LineRole::Atom(0), FrameState::ReadingAtoms(1)),
            FrameState::ReadingAtoms(n) => (LineRole::Atom(n), FrameState::ReadingAtoms(n + 1)),
        };
        self.state = next;

        // Close the frame off as soon as its last line has been consumed. A frame without atoms
        // is complete right after its header.
        match self.state {
            FrameState::ReadingAtoms(n) if n == self.natoms => {
                self.state = FrameState::FrameComplete
            }
            FrameState::ReadingHeader(NHEADER) if self.natoms == 0 => {
                self.state = FrameState::FrameComplete
            }
            _ => {}
        }

        role
    }

    fn header_role(line: usize) -> LineRole {
        match line {
            TIMESTEP_LINE => LineRole::Timestep,
            NATOMS_LINE => LineRole::AtomCount,
            _ => match BOUNDS_LINES.iter().position(|&l| l == line) {
                Some(axis) => LineRole::Bounds(axis),
                None => LineRole::Label,
            },
        }
    }
}

/// A single atom line, before any interpretation of its coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomRecord {
    pub id: u64,
    pub atom_type: u32,
    pub coords: DVec3,
    pub image: IVec3,
}

fn parse_token<T: std::str::FromStr>(token: &str, what: &str) -> Result<T, String> {
    token
        .parse()
        .map_err(|_| format!("could not parse {what} from '{token}'"))
}

/// Parse a `lo hi` bounds line.
pub fn parse_bounds(line: &str) -> Result<(f64, f64), String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [lo, hi] => Ok((
            parse_token(lo, "lower bound")?,
            parse_token(hi, "upper bound")?,
        )),
        _ => Err(format!(
            "expected exactly two bounds ('lo hi'), found {} token(s) in '{line}'",
            tokens.len()
        )),
    }
}

/// Parse an atom line starting with `id type x y z`, optionally followed by `ix iy iz`.
///
/// With exactly eight columns, the last three must be image offsets. With more, columns six to
/// eight are taken as image offsets only when all three are integers. Any other trailing columns
/// (charges, velocities, ...) are ignored.
pub fn parse_atom(line: &str) -> Result<AtomRecord, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [id, ty, x, y, z, rest @ ..] = tokens.as_slice() else {
        return Err(format!(
            "expected at least 5 tokens ('id type x y z'), found {}",
            tokens.len()
        ));
    };
    let image = match rest {
        [ix, iy, iz] => IVec3::new(
            parse_token(ix, "image offset ix")?,
            parse_token(iy, "image offset iy")?,
            parse_token(iz, "image offset iz")?,
        ),
        [ix, iy, iz, _, ..] => match (ix.parse(), iy.parse(), iz.parse()) {
            (Ok(ix), Ok(iy), Ok(iz)) => IVec3::new(ix, iy, iz),
            _ => IVec3::ZERO,
        },
        _ => IVec3::ZERO,
    };
    Ok(AtomRecord {
        id: parse_token(id, "atom id")?,
        atom_type: parse_token(ty, "atom type")?,
        coords: DVec3::new(
            parse_token(x, "x coordinate")?,
            parse_token(y, "y coordinate")?,
            parse_token(z, "z coordinate")?,
        ),
        image,
    })
}

/// Parse the atom count header line, if it holds a plain integer.
pub fn parse_natoms(line: &str) -> Option<usize> {
    line.trim().parse().ok()
}

/// Parse the timestep header line, if it holds a plain integer.
pub fn parse_timestep(line: &str) -> Option<u64> {
    line.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod framer {
        use super::*;

        #[test]
        fn header_roles() {
            let mut framer = Framer::new(2);
            let roles: Vec<_> = (0..NHEADER).map(|_| framer.advance()).collect();
            assert_eq!(
                roles,
                [
                    LineRole::Label,
                    LineRole::Timestep,
                    LineRole::Label,
                    LineRole::AtomCount,
                    LineRole::Label,
                    LineRole::Bounds(0),
                    LineRole::Bounds(1),
                    LineRole::Bounds(2),
                    LineRole::Label,
                ]
            );
            assert_eq!(framer.state(), FrameState::ReadingHeader(NHEADER));
            assert!(framer.is_mid_frame());
        }

        #[test]
        fn frames_by_count() {
            let natoms = 3;
            let mut framer = Framer::new(natoms);
            assert!(!framer.is_mid_frame(), "a fresh framer is between frames");
            for _frame in 0..4 {
                for _ in 0..NHEADER {
                    assert!(!matches!(framer.advance(), LineRole::Atom(_)));
                }
                for idx in 0..natoms {
                    assert!(framer.is_mid_frame());
                    assert_eq!(framer.advance(), LineRole::Atom(idx));
                }
                assert_eq!(framer.state(), FrameState::FrameComplete);
                assert!(!framer.is_mid_frame());
            }
        }

        #[test]
        fn empty_frames() {
            let mut framer = Framer::new(0);
            for _ in 0..NHEADER {
                framer.advance();
            }
            assert_eq!(framer.state(), FrameState::FrameComplete);
            assert_eq!(framer.advance(), LineRole::Label);
            assert_eq!(framer.state(), FrameState::ReadingHeader(1));
        }
    }

    mod lines {
        use super::*;

        #[test]
        fn bounds() {
            assert_eq!(parse_bounds("0.0 10.0"), Ok((0.0, 10.0)));
            assert_eq!(parse_bounds("  -1.5e1\t2.5e1  "), Ok((-15.0, 25.0)));
            assert!(parse_bounds("0.0").is_err());
            assert!(parse_bounds("0.0 10.0 0.5").is_err(), "triclinic tilt is not supported");
            assert!(parse_bounds("zero ten").is_err());
            assert!(parse_bounds("").is_err());
        }

        #[test]
        fn atoms_without_images() {
            let atom = parse_atom("12 3 0.1 0.2 0.3").unwrap();
            assert_eq!(atom.id, 12);
            assert_eq!(atom.atom_type, 3);
            assert_eq!(atom.coords, DVec3::new(0.1, 0.2, 0.3));
            assert_eq!(atom.image, IVec3::ZERO);
        }

        #[test]
        fn atoms_with_images() {
            let atom = parse_atom("7 2 0.5 0.5 0.5 -1 0 2").unwrap();
            assert_eq!(atom.image, IVec3::new(-1, 0, 2));
        }

        #[test]
        fn atoms_with_extra_columns() {
            let atom = parse_atom("1 1 0.1 0.1 0.1 0.5").unwrap();
            assert_eq!(atom.coords, DVec3::new(0.1, 0.1, 0.1));
            assert_eq!(atom.image, IVec3::ZERO);

            let atom = parse_atom("1 1 0.1 0.1 0.1 -0.5 2").unwrap();
            assert_eq!(atom.image, IVec3::ZERO);

            let atom = parse_atom("1 1 0.1 0.1 0.1 0 0 -1 -1.0").unwrap();
            assert_eq!(atom.image, IVec3::new(0, 0, -1));

            let atom = parse_atom("1 1 0.1 0.1 0.1 0.3 1.0 2.0 3.0").unwrap();
            assert_eq!(atom.image, IVec3::ZERO, "fractional columns are not images");
        }

        #[test]
        fn malformed_atoms() {
            for line in [
                "",
                "1 2 0.1 0.2",
                "one 2 0.1 0.2 0.3",
                "1 -2 0.1 0.2 0.3",
                "1 2 0.1 y 0.3",
                "1 2 0.1 0.2 0.3 0 0.5 0",
                "1 2 0.1 0.2 y 0.5",
            ] {
                assert!(parse_atom(line).is_err(), "'{line}' should not parse");
            }
        }

        #[test]
        fn header_integers() {
            assert_eq!(parse_natoms(" 42 "), Some(42));
            assert_eq!(parse_natoms("ITEM: NUMBER OF ATOMS"), None);
            assert_eq!(parse_timestep("1000"), Some(1000));
            assert_eq!(parse_timestep("-"), None);
        }
    }
}
