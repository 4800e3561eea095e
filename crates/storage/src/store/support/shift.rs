#![forbid(unsafe_code)]

use super::super::StoreError;
use super::time::Stamp;
use chk_core::ordering::{Shift, ShiftOrder};
use rusqlite::{Transaction, params};

const SELECT_BLOCK_ASC: &str = "SELECT id, order_index FROM steps \
     WHERE template_id=?1 AND order_index BETWEEN ?2 AND ?3 ORDER BY order_index ASC";
const SELECT_BLOCK_DESC: &str = "SELECT id, order_index FROM steps \
     WHERE template_id=?1 AND order_index BETWEEN ?2 AND ?3 ORDER BY order_index DESC";

/// Moves every step of the block by `shift.delta`, one row at a time in the
/// order that keeps `UNIQUE(template_id, order_index)` satisfied after each
/// statement. Returns the number of rows moved.
pub(in crate::store) fn apply_shift_tx(
    tx: &Transaction<'_>,
    template_id: i64,
    shift: Shift,
    stamp: Stamp<'_>,
) -> Result<usize, StoreError> {
    let sql = match shift.processing_order() {
        ShiftOrder::Ascending => SELECT_BLOCK_ASC,
        ShiftOrder::Descending => SELECT_BLOCK_DESC,
    };
    let block = {
        let mut stmt = tx.prepare(sql)?;
        let rows = stmt.query_map(params![template_id, shift.first, shift.last], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;
        rows.collect::<Result<Vec<_>, _>>()?
    };

    for (step_id, order_index) in block.iter() {
        set_order_index_tx(tx, *step_id, order_index + shift.delta, stamp)?;
    }
    Ok(block.len())
}

pub(in crate::store) fn set_order_index_tx(
    tx: &Transaction<'_>,
    step_id: i64,
    order_index: i64,
    stamp: Stamp<'_>,
) -> Result<(), StoreError> {
    tx.execute(
        "UPDATE steps SET order_index=?2, updated_at_ms=?3, modified_by=?4 WHERE id=?1",
        params![step_id, order_index, stamp.now_ms, stamp.by],
    )?;
    Ok(())
}

/// Current indices of a template, ascending.
pub(in crate::store) fn order_indices_tx(
    tx: &Transaction<'_>,
    template_id: i64,
) -> Result<Vec<i64>, StoreError> {
    let mut stmt =
        tx.prepare("SELECT order_index FROM steps WHERE template_id=?1 ORDER BY order_index ASC")?;
    let rows = stmt.query_map(params![template_id], |row| row.get::<_, i64>(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
