use std::cmp::Ordering;

/// Sorts `items` in place with an unstable quicksort, ordered by `compare`.
///
/// The pivot is taken from the middle of each range, so already sorted input does not degrade to
/// quadratic time. Each range is split three ways, and the run of elements equal to the pivot is
/// never visited again, so input with many equal keys is sorted in close to linear time. Only the
/// smaller outer side is sorted recursively; the larger one is handled by the loop, keeping the
/// stack depth logarithmic.
pub(crate) fn quicksort_by<T, F>(items: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut low = 0;
    let mut high = items.len();

    while high - low > 1 {
        let (less, greater) = partition(&mut items[low..high], compare);
        let (less, greater) = (less + low, greater + low);

        if less - low < high - greater {
            quicksort_by(&mut items[low..less], compare);
            low = greater;
        } else {
            quicksort_by(&mut items[greater..high], compare);
            high = less;
        }
    }
}

/// Partitions `items` around its middle element into `[less | equal | greater]` and returns the
/// bounds `(less, greater)` of the equal run, which always holds at least the pivot. `items` must
/// not be empty.
fn partition<T, F>(items: &mut [T], compare: &mut F) -> (usize, usize)
where
    F: FnMut(&T, &T) -> Ordering,
{
    items.swap(0, items.len() / 2);

    // items[less..i] compare equal to the pivot, which stays at items[less].
    let mut less = 0;
    let mut i = 1;
    let mut greater = items.len();
    while i < greater {
        match compare(&items[i], &items[less]) {
            Ordering::Less => {
                items.swap(less, i);
                less += 1;
                i += 1;
            },
            Ordering::Greater => {
                greater -= 1;
                items.swap(i, greater);
            },
            Ordering::Equal => i += 1,
        }
    }
    (less, greater)
}
