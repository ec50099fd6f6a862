//! Operations on the unsynchronized backing `Vec`.
//!
//! Both lists call these from inside their critical section, so validation always
//! happens under the lock and both strategies fail under identical conditions.

use crate::error::{ListError, Result};

pub(crate) fn insert<T>(items: &mut Vec<T>, index: usize, item: T) -> Result<()> {
    ListError::check_insert_index(index, items.len())?;
    items.insert(index, item);
    Ok(())
}

pub(crate) fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Result<T> {
    ListError::check_index(index, items.len())?;
    Ok(items.remove(index))
}

pub(crate) fn remove<T: PartialEq>(items: &mut Vec<T>, item: &T) -> bool {
    match index_of(items, item) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

pub(crate) fn index_of<T: PartialEq>(items: &[T], item: &T) -> Option<usize> {
    items.iter().position(|x| x == item)
}

pub(crate) fn get<T: Clone>(items: &[T], index: usize) -> Result<T> {
    items
        .get(index)
        .cloned()
        .ok_or(ListError::IndexOutOfRange {
            index,
            len: items.len(),
        })
}

pub(crate) fn set<T>(items: &mut [T], index: usize, item: T) -> Result<T> {
    let len = items.len();
    let slot = items
        .get_mut(index)
        .ok_or(ListError::IndexOutOfRange { index, len })?;
    Ok(std::mem::replace(slot, item))
}

pub(crate) fn copy_to<T: Clone>(items: &[T], dest: &mut [T], offset: usize) -> Result<()> {
    if offset > dest.len() {
        return Err(ListError::IndexOutOfRange {
            index: offset,
            len: dest.len(),
        });
    }
    let available = dest.len() - offset;
    if available < items.len() {
        return Err(ListError::DestinationTooSmall {
            required: items.len(),
            available,
        });
    }
    dest[offset..offset + items.len()].clone_from_slice(items);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_accepts_len_but_not_past_it() {
        let mut items = vec![1, 2];
        insert(&mut items, 2, 3).unwrap();
        assert_eq!(items, [1, 2, 3]);
        assert_eq!(
            insert(&mut items, 4, 9),
            Err(ListError::IndexOutOfRange { index: 4, len: 3 })
        );
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn remove_takes_first_occurrence_only() {
        let mut items = vec![1, 2, 1, 2];
        assert!(remove(&mut items, &2));
        assert_eq!(items, [1, 1, 2]);
        assert!(!remove(&mut items, &7));
        assert_eq!(items, [1, 1, 2]);
    }

    #[test]
    fn set_returns_previous_value() {
        let mut items = vec!['a', 'b'];
        assert_eq!(set(&mut items, 1, 'z'), Ok('b'));
        assert_eq!(items, ['a', 'z']);
        assert_eq!(
            set(&mut items, 2, 'q'),
            Err(ListError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn copy_to_checks_offset_then_room() {
        let items = [1, 2, 3];

        let mut dest = [0; 5];
        copy_to(&items, &mut dest, 2).unwrap();
        assert_eq!(dest, [0, 0, 1, 2, 3]);

        let mut dest = [0; 4];
        assert_eq!(
            copy_to(&items, &mut dest, 2),
            Err(ListError::DestinationTooSmall {
                required: 3,
                available: 2
            })
        );
        assert_eq!(dest, [0; 4]);

        assert_eq!(
            copy_to(&items, &mut dest, 5),
            Err(ListError::IndexOutOfRange { index: 5, len: 4 })
        );
    }
}
