use crate::{JenksErr, JenksNum};

fn class_start(
    lower_class_limits: &[Vec<usize>],
    row: usize,
    class: usize,
) -> Result<usize, JenksErr> {
    lower_class_limits
        .get(row)
        .and_then(|limits| limits.get(class))
        .copied()
        .ok_or(JenksErr::BacktraceError)
}

/// Walk the lower class limits back from the full data length, yielding
/// `nclasses + 1` values: the minimum, the last value of each class but the
/// final one, and the maximum.
pub(crate) fn extract_breaks<T: JenksNum>(
    data: &[T],
    lower_class_limits: &[Vec<usize>],
    nclasses: usize,
) -> Result<Vec<T>, JenksErr> {
    let first = *data.first().ok_or(JenksErr::EmptyInputError)?;
    let last = *data.last().ok_or(JenksErr::EmptyInputError)?;
    // the backtrace never yields the outer bounds, so they're set explicitly
    let mut kclass = vec![first; nclasses + 1];
    kclass[nclasses] = last;

    let mut k = data.len();
    for class in (2..=nclasses).rev() {
        let boundary = class_start(lower_class_limits, k, class)?;
        // the table is 1-based, so the value preceding the class start is at boundary - 2
        kclass[class - 1] = *boundary
            .checked_sub(2)
            .and_then(|idx| data.get(idx))
            .ok_or(JenksErr::BacktraceError)?;
        log::trace!("class {} starts at position {}", class, boundary);
        k = boundary - 1;
    }
    Ok(kclass)
}

/// The same backtrace as [`extract_breaks`], slicing out each class instead.
pub(crate) fn extract_classes<T: JenksNum>(
    data: &[T],
    lower_class_limits: &[Vec<usize>],
    nclasses: usize,
) -> Result<Vec<Vec<T>>, JenksErr> {
    let mut classes = Vec::with_capacity(nclasses);
    let mut class_end = data.len();
    for class in (2..=nclasses).rev() {
        let boundary = class_start(lower_class_limits, class_end, class)?;
        if boundary < 2 {
            return Err(JenksErr::BacktraceError);
        }
        let members = data
            .get(boundary - 1..class_end)
            .ok_or(JenksErr::BacktraceError)?;
        classes.push(members.to_vec());
        class_end = boundary - 1;
    }
    classes.push(data[..class_end].to_vec());
    classes.reverse();
    Ok(classes)
}
