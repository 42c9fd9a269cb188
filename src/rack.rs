use std::fmt;
use std::str::FromStr;

use super::{Letter, RackError, RackTile, RACK_SIZE};

/// The tiles a player holds, as a multiset
///
/// Small and `Copy`: removing a tile gives back a new rack, so a search can
/// hand each branch its own snapshot and the caller's rack never changes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rack {
    letters: [u8; 26],
    n_blanks: u8,
    /// The total number of letters+blanks
    n_total: u8,
}

impl Rack {
    pub fn empty() -> Rack {
        Rack::default()
    }

    pub fn new(tiles: impl IntoIterator<Item = RackTile>) -> Result<Rack, RackError> {
        let mut rack = Rack::empty();
        let mut count = 0;
        for tile in tiles {
            count += 1;
            if count <= RACK_SIZE {
                rack = rack.with(tile);
            }
        }
        if count > RACK_SIZE {
            return Err(RackError::TooManyTiles { max: RACK_SIZE, got: count });
        }
        Ok(rack)
    }

    fn with(mut self, tile: RackTile) -> Rack {
        match tile {
            RackTile::Letter(l) => self.letters[l.index()] += 1,
            RackTile::Blank => self.n_blanks += 1,
        }
        self.n_total += 1;
        self
    }

    pub fn len(&self) -> usize {
        self.n_total as usize
    }

    pub fn is_empty(&self) -> bool {
        self.n_total == 0
    }

    pub fn count(&self, letter: Letter) -> usize {
        self.letters[letter.index()] as usize
    }

    pub fn blanks(&self) -> usize {
        self.n_blanks as usize
    }

    pub fn remove(&self, letter: Letter) -> Option<Rack> {
        if self.letters[letter.index()] > 0 {
            let mut tmp = *self;
            tmp.letters[letter.index()] -= 1;
            tmp.n_total -= 1;
            Some(tmp)
        } else {
            None
        }
    }

    pub fn remove_blank(&self) -> Option<Rack> {
        if self.n_blanks > 0 {
            let mut tmp = *self;
            tmp.n_blanks -= 1;
            tmp.n_total -= 1;
            Some(tmp)
        } else {
            None
        }
    }

    pub fn remove_tile(&self, tile: RackTile) -> Option<Rack> {
        match tile {
            RackTile::Letter(l) => self.remove(l),
            RackTile::Blank => self.remove_blank(),
        }
    }

    /// Removes every tile of `tiles`, or fails with the ones that are missing
    pub fn take_all(&self, tiles: &[RackTile]) -> Result<Rack, Vec<RackTile>> {
        let mut rack = *self;
        let mut missing = vec![];
        for &tile in tiles {
            match rack.remove_tile(tile) {
                Some(rest) => rack = rest,
                None => missing.push(tile),
            }
        }
        if missing.is_empty() {
            Ok(rack)
        } else {
            Err(missing)
        }
    }

    /// Letters in alphabetical order, then blanks
    pub fn tiles(&self) -> impl Iterator<Item = RackTile> + '_ {
        Letter::alphabet()
            .flat_map(move |l| std::iter::repeat(RackTile::Letter(l)).take(self.count(l)))
            .chain(std::iter::repeat(RackTile::Blank).take(self.blanks()))
    }
}

impl FromStr for Rack {
    type Err = RackError;

    /// Letters in either case, `*` or `?` for blanks; whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| RackTile::from_char(c).ok_or(RackError::InvalidTile(c)))
            .collect::<Result<Vec<_>, _>>()?;
        Rack::new(tiles)
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for tile in self.tiles() {
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Rack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{} tiles]", self, self.n_total)
    }
}

#[test]
fn rack_from_str() {
    let rack: Rack = "t a c*".parse().unwrap();
    assert_eq!(rack.len(), 4);
    assert_eq!(rack.blanks(), 1);
    assert_eq!(rack.count(Letter::new('C').unwrap()), 1);
    assert_eq!(rack.to_string(), "ACT*");
    assert_eq!(format!("{:?}", rack), "ACT*[4 tiles]");

    assert_eq!("AB?".parse::<Rack>().unwrap().blanks(), 1);
    assert_eq!("".parse::<Rack>(), Ok(Rack::empty()));
    assert_eq!("AB1".parse::<Rack>(), Err(RackError::InvalidTile('1')));
    assert_eq!(
        "ABCDEFGH".parse::<Rack>(),
        Err(RackError::TooManyTiles { max: RACK_SIZE, got: 8 }),
    );
}

#[test]
fn removing_leaves_the_original() {
    let rack: Rack = "AA*".parse().unwrap();
    let a = Letter::new('A').unwrap();
    let b = Letter::new('B').unwrap();

    let rest = rack.remove(a).unwrap();
    assert_eq!(rest.count(a), 1);
    assert_eq!(rest.len(), 2);
    assert_eq!(rack.count(a), 2);
    assert_eq!(rack.remove(b), None);

    let no_blank = rack.remove_blank().unwrap();
    assert_eq!(no_blank.remove_blank(), None);
    assert_eq!(rack.len(), 3);

    assert_eq!(
        rack.take_all(&[RackTile::Letter(a), RackTile::Blank]),
        Ok("A".parse().unwrap()),
    );
    assert_eq!(
        rack.take_all(&[RackTile::Blank, RackTile::Blank, RackTile::Letter(b)]),
        Err(vec![RackTile::Blank, RackTile::Letter(b)]),
    );
}
