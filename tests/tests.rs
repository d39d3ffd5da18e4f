// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod style_expression;
mod value;
