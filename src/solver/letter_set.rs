use std::fmt;

use crate::Letter;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct LetterSet {
    // bit i is one if the i-th letter of the alphabet is in it
    accepted: u32,
}

impl LetterSet {
    pub const ALPHABET: Self = Self { accepted: (1 << 26) - 1 };

    pub fn empty() -> Self {
        Self { accepted: 0 }
    }
    pub fn contains(&self, letter: Letter) -> bool {
        self.accepted & (1 << letter.index()) != 0
    }
    pub fn insert(&mut self, letter: Letter) {
        self.accepted |= 1 << letter.index()
    }
    pub fn is_empty(&self) -> bool {
        self.accepted == 0
    }
    /// Every letter is allowed
    pub fn is_any(&self) -> bool {
        self.accepted == Self::ALPHABET.accepted
    }
    pub fn len(&self) -> usize {
        self.accepted.count_ones() as usize
    }
    /// In alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = Letter> + '_ {
        (0..26).filter(move |&i| self.accepted & (1 << i) != 0).map(Letter::from_index)
    }
}

impl Default for LetterSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::iter::FromIterator<Letter> for LetterSet {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Letter>,
    {
        let mut tmp = Self::default();
        iter.into_iter().for_each(|l| tmp.insert(l));
        tmp
    }
}

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_any() {
            write!(f, ".")
        } else {
            write!(f, "[")?;
            for l in self.iter() {
                write!(f, "{}", l)?;
            }
            write!(f, "]")
        }
    }
}

#[test]
fn letter_set() {
    let empty = LetterSet::empty();
    assert!(Letter::alphabet().all(|l| !empty.contains(l)));
    assert!(empty.is_empty());
    assert!(!empty.is_any());

    let some: LetterSet = "QEXE".chars().filter_map(Letter::new).collect();
    assert_eq!(some.len(), 3);
    assert_eq!(some.iter().map(|l| l.as_char()).collect::<String>(), "EQX");
    assert!(!some.contains(Letter::new('A').unwrap()));
    assert!(!some.is_empty());
    assert!(!some.is_any());
    assert_eq!(format!("{:?}", some), "[EQX]");

    let any = LetterSet::ALPHABET;
    assert!(Letter::alphabet().all(|l| any.contains(l)));
    assert_eq!(any.len(), 26);
    assert!(any.is_any());
    assert_eq!(format!("{:?}", any), ".");
    assert_eq!(Letter::alphabet().collect::<LetterSet>(), any);
}
