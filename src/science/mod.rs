// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
pub mod constraints; // [CORE] Feasibility Gate
pub mod strength;
pub mod sustainability;
