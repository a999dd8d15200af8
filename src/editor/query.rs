//! Input-method queries and per-frame paint state.
//!
//! Offsets reported to the input method count UTF-16 code units from the
//! start of the caret's paragraph, matching what platform IMEs send back.

use crate::coords::{CoordinateMapper, Rect};
use crate::document::DocumentFacade;
use crate::ime::IndicatorKind;
use crate::surface::{CaretPaint, ImeQuery, ImeQueryValue, PaintState};

use super::Editor;

impl<D: DocumentFacade, M: CoordinateMapper> Editor<D, M> {
    fn utf16_len(&self, start: usize, end: usize) -> usize {
        if end <= start {
            return 0;
        }
        self.doc.text_range(start..end).encode_utf16().count()
    }

    fn caret_rect(&self, position: usize) -> Rect {
        let point = self.mapper.location_from_position(&self.doc, position);
        Rect::new(
            point.x,
            point.y,
            f64::from(self.config.caret_width),
            self.mapper.line_height(),
        )
    }

    pub fn query(&self, query: ImeQuery) -> ImeQueryValue {
        let pos = self.current_position();
        let para_start = self.doc.para_up(pos);

        match query {
            ImeQuery::CursorRectangle => {
                let at = self.composition.preedit_position.unwrap_or(pos);
                ImeQueryValue::Rect(self.caret_rect(at))
            }
            ImeQuery::AnchorRectangle => {
                let end = self.selection.primary().end().position;
                ImeQueryValue::Rect(self.caret_rect(end))
            }
            ImeQuery::CursorPosition => ImeQueryValue::Offset(self.utf16_len(para_start, pos)),
            ImeQuery::AnchorPosition => {
                let end = self.selection.primary().end().position;
                ImeQueryValue::Offset(self.utf16_len(para_start, end))
            }
            ImeQuery::AbsolutePosition => ImeQueryValue::Offset(self.utf16_len(0, pos)),
            ImeQuery::SurroundingText => {
                let para_end = self.doc.para_down(pos);
                ImeQueryValue::Text(self.doc.text_range(para_start..para_end))
            }
            ImeQuery::TextBeforeCursor => ImeQueryValue::Text(self.doc.text_range(para_start..pos)),
            ImeQuery::TextAfterCursor => {
                let para_end = self.doc.para_down(pos);
                ImeQueryValue::Text(self.doc.text_range(pos..para_end))
            }
            ImeQuery::CurrentSelection => ImeQueryValue::Text(self.selected_text()),
            // Points before the paragraph report offset 0
            ImeQuery::PositionAt(point) => {
                let hit = self.mapper.position_from_location(&self.doc, point);
                ImeQueryValue::Offset(self.utf16_len(para_start, hit))
            }
            ImeQuery::MaximumTextLength => ImeQueryValue::None,
            ImeQuery::Hints => ImeQueryValue::Hints(self.input_hints),
            ImeQuery::Enabled => ImeQueryValue::Bool(!self.doc.is_read_only()),
        }
    }

    pub fn paint_state(&self) -> PaintState {
        let block = self.composition.block_caret_override;
        let carets = self
            .selection
            .ranges()
            .enumerate()
            .map(|(i, range)| CaretPaint {
                position: range.caret.position,
                point: self.mapper.location_from_position(&self.doc, range.caret.position),
                block,
                primary: i == 0,
            })
            .collect();

        let selections = self
            .selection
            .ranges()
            .filter(|r| !r.is_empty())
            .map(|r| r.start().position..r.end().position)
            .collect();

        let indicators = IndicatorKind::ALL
            .into_iter()
            .flat_map(|kind| {
                self.doc
                    .indicator_runs(kind.id())
                    .into_iter()
                    .map(move |run| (kind, run))
            })
            .collect();

        PaintState {
            carets,
            caret_width: self.config.caret_width,
            selections,
            indicators,
        }
    }
}
